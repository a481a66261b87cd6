fn main() -> anyhow::Result<()> {
    stockcast_observability::init();

    let settings = stockcast_cli::Settings::from_env(std::env::args().skip(1))?;
    let output = stockcast_cli::run(&settings)?;
    println!("{output}");
    Ok(())
}
