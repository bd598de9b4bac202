//! 检查点查看工具

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use anyhow::{anyhow, Context};
use clap::{CommandFactory, Parser};

use ckpt_inspect::utils::{describe_error, init_logging, AppResult};
use ckpt_inspect::{config, inspect};

/// 解码、渲染和释放对象树都按嵌套深度递归，在大栈线程上执行
const INSPECT_STACK_SIZE: usize = 512 * 1024 * 1024;

#[derive(Parser)]
#[command(name = "ckpt-inspect")]
#[command(
    version,
    about = "Print the contents of a compressed workflow checkpoint file",
    long_about = None
)]
struct Cli {
    /// Path to the checkpoint file (.pklz or .pkl)
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 无参数时打印帮助并正常退出
    let Some(path) = cli.path else {
        return match Cli::command().print_help() {
            Ok(()) => {
                println!();
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::FAILURE
            }
        };
    };

    if let Err(e) = init_logging() {
        eprintln!("{}", e);
    }

    match run(path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", describe_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(path: PathBuf) -> AppResult<()> {
    let config = config::load_config()?;

    thread::Builder::new()
        .name("inspect".into())
        .stack_size(INSPECT_STACK_SIZE)
        .spawn(move || {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            inspect(&path, &config, &mut out)
        })
        .context("Failed to start inspect thread")?
        .join()
        .map_err(|_| anyhow!("inspect thread panicked"))?
}
