use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_IMAGE: &str = "docker.io/httpd:latest";
pub const DEFAULT_NEW_IMAGE: &str = "docker.io/nginx:latest";

#[derive(Parser)]
#[command(name = "kube-workloads")]
#[command(
    about = "Create, patch, scale and delete cluster workloads, and watch for crash-looping pods"
)]
pub struct Cli {
    /// Path to the kubeconfig file (defaults to $HOME/.kube/config)
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Context
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage apps/v1 Deployments
    #[command(subcommand)]
    Deployment(DeploymentCommand),

    /// Manage OpenShift DeploymentConfigs
    #[command(subcommand, alias = "dc")]
    DeploymentConfig(DeploymentConfigCommand),

    /// Manage OpenShift MachineSets
    #[command(subcommand, name = "machineset", alias = "ms")]
    MachineSet(MachineSetCommand),

    /// Stream pod events
    #[command(subcommand)]
    Watch(WatchCommand),
}

/// A named resource in a namespace
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Resource name
    pub name: String,

    /// Namespace
    #[arg(short = 'n', long, default_value = "default")]
    pub namespace: String,
}

#[derive(Subcommand)]
pub enum DeploymentCommand {
    /// Create a Deployment running a single web container
    Create {
        #[command(flatten)]
        target: Target,
        #[arg(long, default_value = DEFAULT_IMAGE)]
        image: String,
        #[arg(long, default_value_t = 1)]
        replicas: i32,
    },
    /// Print a Deployment as YAML
    Get {
        #[command(flatten)]
        target: Target,
    },
    /// List Deployments in a namespace
    List {
        #[arg(short = 'n', long, default_value = "default")]
        namespace: String,
    },
    /// Replace the image of the first container
    SetImage {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        image: String,
    },
    /// Scale through the scale subresource; negative counts are a no-op
    Scale {
        #[command(flatten)]
        target: Target,
        #[arg(long, allow_negative_numbers = true)]
        replicas: i32,
    },
    /// Delete a Deployment
    Delete {
        #[command(flatten)]
        target: Target,
    },
    /// Create, get, list, update, scale and delete a Deployment in sequence
    Demo {
        #[command(flatten)]
        target: Target,
        #[arg(long, default_value = DEFAULT_IMAGE)]
        image: String,
        #[arg(long, default_value = DEFAULT_NEW_IMAGE)]
        new_image: String,
        #[arg(long, default_value_t = 1)]
        replicas: i32,
    },
}

#[derive(Subcommand)]
pub enum DeploymentConfigCommand {
    /// Create a DeploymentConfig with a ConfigChange trigger
    Create {
        #[command(flatten)]
        target: Target,
        #[arg(long, default_value = DEFAULT_IMAGE)]
        image: String,
        #[arg(long, default_value_t = 1)]
        replicas: i32,
    },
    /// List DeploymentConfigs in a namespace
    List {
        #[arg(short = 'n', long, default_value = "default")]
        namespace: String,
    },
    /// Replace the image of the first container
    SetImage {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        image: String,
    },
    /// Patch spec.replicas
    Scale {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        replicas: u32,
    },
    /// Delete a DeploymentConfig
    Delete {
        #[command(flatten)]
        target: Target,
    },
    /// Create, list, update, scale and delete a DeploymentConfig in sequence
    Demo {
        #[command(flatten)]
        target: Target,
        #[arg(long, default_value = DEFAULT_IMAGE)]
        image: String,
        #[arg(long, default_value = DEFAULT_NEW_IMAGE)]
        new_image: String,
        #[arg(long, default_value_t = 1)]
        replicas: i32,
    },
}

#[derive(Subcommand)]
pub enum MachineSetCommand {
    /// Patch every MachineSet in the cluster to the given replica count
    Scale {
        #[arg(long, default_value_t = 2)]
        replicas: u32,
    },
}

#[derive(Subcommand)]
pub enum WatchCommand {
    /// Print pods with containers waiting in CrashLoopBackOff
    #[command(name = "crashloop")]
    CrashLoop {
        /// Namespace (all namespaces when omitted)
        #[arg(short = 'n', long)]
        namespace: Option<String>,
    },
}
