//! Runtime configuration for the gateway.

use query_engine_metadata::metadata;

use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;
use crate::values::{ConnectionUri, PoolSettings, Secret};
use crate::version1::ParsedConfiguration;

/// The 'Configuration' type collects all the information necessary to serve requests at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration': secrets are resolved against the environment and the
/// compiled-in catalog is attached.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub metadata: metadata::Metadata,
    pub pool_settings: PoolSettings,
    pub connection_uri: String,
}

/// Resolve a parsed configuration into the configuration used while serving.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let connection_uri = match parsed_config.connection_uri {
        ConnectionUri(Secret::Plain { value }) => value,
        ConnectionUri(Secret::FromEnvironment { variable }) => {
            environment.read(&variable).map_err(|error| {
                MakeRuntimeConfigurationError::MissingEnvironmentVariable {
                    setting: "connectionUri".to_string(),
                    message: error.to_string(),
                }
            })?
        }
    };
    Ok(Configuration {
        metadata: metadata::Metadata::inventory(),
        pool_settings: parsed_config.pool_settings,
        connection_uri,
    })
}
