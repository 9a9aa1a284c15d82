//! Basic math operations, declared as cliar handlers

use cliar::cli::{init_logging, report_error, run};
use cliar::definition::{Cli, CommandDef, Param, Primitive, TypeTag};
use cliar::runner::Outcome;
use std::fs;
use std::path::PathBuf;
use std::process;

fn factorial(n: i64, acc: i64) -> anyhow::Result<i64> {
    match n {
        0 => Ok(acc),
        n if n > 0 => factorial(n - 1, acc * n),
        _ => anyhow::bail!("Cannot calculate factorial of negative number."),
    }
}

fn math() -> Cli {
    Cli::new("basicmath")
        .about("Basic math operations.")
        .root(
            CommandDef::new("_root", |inv| {
                if inv.get::<bool>("version")? {
                    println!("{}", cliar::VERSION);
                } else {
                    println!("Welcome to math!");
                }
                Ok(Outcome::Handled)
            })
            .param(Param::flag("version")),
        )
        .command(
            CommandDef::new("add", |inv| {
                println!("{}", inv.get::<i64>("x")? + inv.get::<i64>("y")?);
                Ok(Outcome::Handled)
            })
            .doc("Add two numbers.")
            .param(Param::new("x").typed(Primitive::Int))
            .param(Param::new("y").typed(Primitive::Int))
            .help("x", "First operand")
            .help("y", "Second operand"),
        )
        .command(
            CommandDef::new("power", |inv| {
                let x = inv.get::<i64>("x")?;
                let power = u32::try_from(inv.get::<i64>("power")?)?;
                println!("{}", x.pow(power));
                Ok(Outcome::Handled)
            })
            .param(Param::new("x").typed(Primitive::Int))
            .param(Param::new("power").default(2)),
        )
        .command(CommandDef::new("pi", |_| {
            println!("{}", std::f64::consts::PI);
            Ok(Outcome::Handled)
        }))
        .command(
            CommandDef::new("echo", |inv| {
                println!("{}", inv.get::<String>("message")?);
                Ok(Outcome::Handled)
            })
            .param(Param::new("message").typed(Primitive::Str)),
        )
        .command(
            CommandDef::new("summ", |inv| {
                println!("{}", inv.get::<Vec<i64>>("numbers")?.iter().sum::<i64>());
                Ok(Outcome::Handled)
            })
            .param(Param::new("numbers").typed(TypeTag::list(Primitive::Int)))
            .aliases(["sum", "plus"]),
        )
        .command(
            CommandDef::new("avg", |inv| {
                let numbers = inv.get::<Vec<f64>>("numbers")?;
                println!("{}", numbers.iter().sum::<f64>() / numbers.len() as f64);
                Ok(Outcome::Handled)
            })
            .param(
                Param::new("numbers")
                    .typed(TypeTag::list(Primitive::Float))
                    .default(vec![1, 2, 3]),
            ),
        )
        .command(
            CommandDef::new("sumfile", |inv| {
                let contents = fs::read_to_string(inv.get::<PathBuf>("file")?)?;
                let mut total = 0.0;
                for line in contents.lines().filter(|l| !l.trim().is_empty()) {
                    total += line.trim().parse::<f64>()?;
                }
                println!("{}", total);
                Ok(Outcome::Handled)
            })
            .param(Param::new("file").typed(Primitive::Path)),
        )
        .command(
            CommandDef::new("calculate_factorial", |_| Ok(Outcome::Handled))
                .param(Param::new("n").typed(Primitive::Int))
                .param(Param::new("acc").typed(Primitive::Int))
                .ignore(),
        )
        .command(
            CommandDef::new("factorial", |inv| {
                println!("{}", factorial(inv.get::<i64>("n")?, 1)?);
                Ok(Outcome::Handled)
            })
            .param(Param::new("n").typed(Primitive::Int))
            .name("fac"),
        )
        .command(
            CommandDef::new("log", |inv| {
                let x = inv.get::<f64>("x")?;
                println!("{}", x.log(inv.get::<f64>("base")?));
                Ok(Outcome::Handled)
            })
            .param(Param::new("x").typed(Primitive::Float))
            .param(Param::new("base").default(std::f64::consts::E))
            .arg_name("base", "to")
            .metavar("base", "BASE"),
        )
}

fn main() {
    init_logging();

    if let Err(e) = run(&math()) {
        report_error(&e);
        process::exit(1);
    }
}
