use clap::{Parser, Subcommand};
use cloudfs::{
    CloudStorage, DriveApiConfig, HttpDriveTransport, Scope, StorageConfig, StorageError,
};

#[derive(Parser)]
#[command(name = "cloudfs")]
#[command(version)]
#[command(about = "POSIX-like file operations on Google Drive", long_about = None)]
struct Cli {
    /// Storage scope: documents or app_data
    #[arg(long, default_value = "app_data", global = true)]
    scope: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a path exists
    Exists { path: String },
    /// Print a file's content
    Cat { path: String },
    /// Write a file, creating or overwriting it
    Write {
        path: String,
        data: String,
        /// Fail if the file already exists
        #[arg(long)]
        no_overwrite: bool,
    },
    /// Append to a file, creating it if absent
    Append { path: String, data: String },
    /// List the entries of a directory
    Ls {
        #[arg(default_value = "/")]
        path: String,
    },
    /// Create a directory
    Mkdir { path: String },
    /// Delete a file
    Rm { path: String },
    /// Delete a directory
    Rmdir {
        path: String,
        /// Delete contents as well
        #[arg(short, long)]
        recursive: bool,
    },
    /// Show size, timestamps, and type of an entry
    Stat { path: String },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error [{}]: {}", e.code(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), StorageError> {
    let scope: Scope = cli.scope.parse()?;
    let token = std::env::var("GOOGLE_DRIVE_ACCESS_TOKEN").ok();

    let transport = HttpDriveTransport::new(&DriveApiConfig::default())?;
    let storage =
        CloudStorage::new(transport, StorageConfig { access_token: token, ..Default::default() });

    match cli.command {
        Commands::Exists { path } => {
            println!("{}", storage.exists(&path, scope)?);
        }
        Commands::Cat { path } => {
            print!("{}", storage.read_file(&path, scope)?);
        }
        Commands::Write { path, data, no_overwrite } => {
            storage.write_file(&path, &data, scope, !no_overwrite)?;
        }
        Commands::Append { path, data } => {
            storage.append_file(&path, &data, scope)?;
        }
        Commands::Ls { path } => {
            for name in storage.readdir(&path, scope)? {
                println!("{name}");
            }
        }
        Commands::Mkdir { path } => {
            storage.mkdir(&path, scope)?;
        }
        Commands::Rm { path } => {
            storage.unlink(&path, scope)?;
        }
        Commands::Rmdir { path, recursive } => {
            storage.rmdir(&path, recursive, scope)?;
        }
        Commands::Stat { path } => {
            let stat = storage.stat(&path, scope)?;
            let kind = if stat.is_directory { "directory" } else { "file" };
            println!("type: {kind}");
            println!("size: {}", stat.size_bytes);
            println!("created_ms: {}", stat.created_at_ms);
            println!("modified_ms: {}", stat.modified_at_ms);
        }
    }

    Ok(())
}
