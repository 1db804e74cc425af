use clap::Parser;

use stats::{Args, run};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("{}", run(&args)?);

    Ok(())
}
