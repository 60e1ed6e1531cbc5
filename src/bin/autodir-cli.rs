use clap::{Parser, Subcommand};

use autodir::client::{join_path, FileInfo, FsError, HttpFs};

#[derive(Parser)]
#[command(name = "autodir-cli")]
#[command(about = "Browse an HTTP route tree like a filesystem", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a directory
    Ls {
        #[arg(default_value = ".")]
        path: String,
        /// Long format with mode, size and modification time
        #[arg(short, long)]
        long: bool,
    },
    /// Show metadata for a path
    Stat { path: String },
    /// Print the contents of a path
    Cat { path: String },
    /// Recursively list a directory
    Tree {
        #[arg(default_value = ".")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let fs = HttpFs::new(&cli.url)?;

    let result = match cli.command {
        Commands::Ls { path, long } => ls(&fs, &path, long).await,
        Commands::Stat { path } => fs.stat(&path).await.map(|info| {
            println!("{}", long_line(&info));
        }),
        Commands::Cat { path } => fs.read(&path).await.map(|body| {
            print!("{}", String::from_utf8_lossy(&body));
        }),
        Commands::Tree { path } => {
            println!("{}", path);
            tree(&fs, &path, "").await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn ls(fs: &HttpFs, path: &str, long: bool) -> Result<(), FsError> {
    if !long {
        for entry in fs.list(path).await? {
            println!("{}", entry);
        }
        return Ok(());
    }
    for info in fs.read_dir(path).await? {
        println!("{}", long_line(&info));
    }
    Ok(())
}

async fn tree(fs: &HttpFs, path: &str, indent: &str) -> Result<(), FsError> {
    let entries = fs.list(path).await?;
    let count = entries.len();
    for (i, entry) in entries.into_iter().enumerate() {
        let last = i + 1 == count;
        println!("{}{}{}", indent, if last { "└── " } else { "├── " }, entry);
        if entry.ends_with('/') {
            let child_indent = format!("{}{}", indent, if last { "    " } else { "│   " });
            Box::pin(tree(fs, &join_path(path, &entry), &child_indent)).await?;
        }
    }
    Ok(())
}

fn long_line(info: &FileInfo) -> String {
    format!(
        "{} {:>8} {} {}",
        info.mode_string(),
        info.size,
        info.modified.format("%Y-%m-%d %H:%M"),
        info.name
    )
}
