//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Register and recognize faces with a camera and a recognition backend
#[derive(Parser, Debug)]
#[command(name = "facecheck")]
#[command(version, about = "Camera client for a face recognition service", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Enroll a person from the default camera
    facecheck register --id 42 --name Alice

    # Identify whoever is in front of camera 1
    facecheck --camera 1 recognize

    # Use a photo instead of a camera
    facecheck --image alice.jpg recognize

    # Show every enrolled person
    facecheck persons")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Backend URL (overrides config file and FACECHECK_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Camera device index (from list-cameras)
    #[arg(long, global = true)]
    pub camera: Option<u32>,

    /// Read frames from an image file instead of a camera
    #[arg(long, global = true, conflicts_with = "test_pattern")]
    pub image: Option<PathBuf>,

    /// Use a synthetic test pattern instead of a camera
    #[arg(long, global = true)]
    pub test_pattern: bool,

    /// Mirror snapshots horizontally
    #[arg(long, global = true)]
    pub mirror: bool,

    /// Seconds to wait for the camera's first frame
    #[arg(long, global = true, default_value = "5")]
    pub warmup: u64,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Register a person from a camera snapshot
    Register {
        /// Person identifier
        #[arg(long)]
        id: Option<String>,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Recognize the face currently in front of the camera
    Recognize,
    /// List registered persons (ID and name)
    List,
    /// Show every person with their enrolled-image count
    Persons,
    /// Delete a registered person
    Delete {
        /// ID of the person to delete
        #[arg(long)]
        id: Option<String>,
    },
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_args() {
        let args = Args::parse_from(["facecheck", "register", "--id", "42", "--name", "Alice"]);
        match args.command {
            Command::Register { id, name } => {
                assert_eq!(id.as_deref(), Some("42"));
                assert_eq!(name.as_deref(), Some("Alice"));
            }
            other => panic!("expected register, got {:?}", other),
        }
        assert_eq!(args.warmup, 5);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from([
            "facecheck",
            "recognize",
            "--backend",
            "http://faces.local",
            "--camera",
            "2",
        ]);
        assert!(matches!(args.command, Command::Recognize));
        assert_eq!(args.backend.as_deref(), Some("http://faces.local"));
        assert_eq!(args.camera, Some(2));
    }

    #[test]
    fn test_image_conflicts_with_test_pattern() {
        let result = Args::try_parse_from([
            "facecheck",
            "--image",
            "face.jpg",
            "--test-pattern",
            "recognize",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_subcommand() {
        let args = Args::parse_from(["facecheck", "config", "init"]);
        assert!(matches!(
            args.command,
            Command::Config {
                action: ConfigAction::Init
            }
        ));
    }
}
