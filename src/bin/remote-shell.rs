//! Remote shell client: global credentials, nested utilities, async wait

use cliar::cli::{init_logging, report_error, run};
use cliar::definition::{Cli, CommandDef, Param};
use cliar::runner::{Invocation, Outcome};
use std::process;
use std::time::Duration;

fn credentials(inv: &Invocation) -> anyhow::Result<(String, String)> {
    let globals = inv.globals();
    Ok((globals.get::<String>("as")?, globals.get::<String>("password")?))
}

fn utils() -> Cli {
    Cli::new("utils").about("File utilities.").command(
        CommandDef::new("upload", |inv| {
            let (user, password) = credentials(&inv)?;
            println!(
                "Uploading {}, user=\"{}\", password=\"{}\"",
                inv.get::<String>("file")?,
                user,
                password
            );
            Ok(Outcome::Handled)
        })
        .param(Param::new("file")),
    )
}

fn shell() -> Cli {
    Cli::new("remote-shell")
        .about("Remote shell client.")
        .root(
            CommandDef::new("_root", |_| Ok(Outcome::ShowHelp))
                .param(Param::new("user").default(""))
                .param(Param::new("password").default(""))
                .arg_name("user", "as")
                .short("user", None),
        )
        .command(
            CommandDef::new("connect", |inv| {
                let (user, password) = credentials(&inv)?;
                println!(
                    "Connecting to {}, user=\"{}\", password=\"{}\"",
                    inv.get::<String>("host")?,
                    user,
                    password
                );
                Ok(Outcome::Handled)
            })
            .doc("Open a session on a remote host.")
            .param(Param::new("host")),
        )
        .command(
            CommandDef::new_async("wait", |inv: Invocation| async move {
                let seconds = inv.get::<f64>("seconds_to_wait")?;
                println!("Waiting {} seconds", seconds);
                tokio::time::sleep(Duration::try_from_secs_f64(seconds)?).await;
                println!("Done");
                Ok::<_, anyhow::Error>(Outcome::Handled)
            })
            .param(Param::new("seconds_to_wait").default(1.0)),
        )
        .subcli("utils", utils())
}

fn main() {
    init_logging();

    if let Err(e) = run(&shell()) {
        report_error(&e);
        process::exit(1);
    }
}
