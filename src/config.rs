//! Model assembly configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::selection::Activation;

/// Settings for [`ModelBuilder`](crate::formulation::ModelBuilder).
///
/// Defaults to a model named `3l-cvrp` with every constraint family active.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::config::ModelConfig;
/// use u_3lcvrp::selection::Activation;
///
/// let config = ModelConfig::default().with_activation(Activation::from(2..=5));
/// assert!(config.activation.contains(3));
///
/// let parsed = ModelConfig::from_json(r#"{"name": "small", "activation": "2-5"}"#).unwrap();
/// assert_eq!(parsed.name, "small");
/// assert_eq!(parsed.activation, Activation::from(2..=5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model name passed to the solver.
    pub name: String,
    /// Constraint slots to enable.
    pub activation: Activation,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "3l-cvrp".to_string(),
            activation: Activation::all(),
        }
    }
}

impl ModelConfig {
    /// Sets the model name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the constraint activation.
    pub fn with_activation(mut self, activation: impl Into<Activation>) -> Self {
        self.activation = activation.into();
        self
    }

    /// Parses a configuration from JSON; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
