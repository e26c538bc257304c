use kube::Client;
use kube::config::{self, KubeConfigOptions, Kubeconfig, KubeconfigError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Failures that happen before any API request is made. All of them are fatal.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("error getting user home dir")]
    HomeDir,

    #[error("error reading kubeconfig {}", path.display())]
    Kubeconfig {
        path: PathBuf,
        #[source]
        source: KubeconfigError,
    },

    #[error("error getting kubernetes config")]
    Config(#[source] KubeconfigError),

    #[error("error creating kubernetes client")]
    Client(#[source] kube::Error),
}

/// `$HOME/.kube/config`
pub fn default_kubeconfig_path() -> Result<PathBuf, SetupError> {
    let dirs = directories::BaseDirs::new().ok_or(SetupError::HomeDir)?;
    Ok(kubeconfig_under(dirs.home_dir()))
}

pub fn kubeconfig_under(home: &Path) -> PathBuf {
    home.join(".kube").join("config")
}

/// Load the kubeconfig file, falling back to the one in the home directory.
pub async fn load_config(
    kubeconfig: Option<PathBuf>,
    context: Option<String>,
) -> Result<config::Config, SetupError> {
    let path = match kubeconfig {
        Some(path) => path,
        None => default_kubeconfig_path()?,
    };
    println!("Using kubeconfig: {}", path.display());

    let kubeconfig = Kubeconfig::read_from(&path).map_err(|source| SetupError::Kubeconfig {
        path: path.clone(),
        source,
    })?;

    let context_name = context
        .clone()
        .or_else(|| kubeconfig.current_context.clone())
        .unwrap_or_else(|| "default".to_string());

    let options = KubeConfigOptions {
        context,
        ..Default::default()
    };
    let config = config::Config::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(SetupError::Config)?;
    info!("Using context: {}", context_name);
    debug!("Cluster URL: {}", config.cluster_url);
    Ok(config)
}

/// Let a watch sit idle for as long as the API server keeps it open.
pub fn without_read_timeout(mut config: config::Config) -> config::Config {
    config.read_timeout = None;
    config
}

pub fn build_client(config: config::Config) -> Result<Client, SetupError> {
    Client::try_from(config).map_err(SetupError::Client)
}
