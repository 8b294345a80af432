//! Planner parameters
//!
//! Every query is configured once at construction; there is no runtime
//! reconfiguration. Parameters load from TOML with per-field defaults:
//!
//! ```toml
//! knn_num = 10
//! max_connect_param = 128
//! min_clearance = 0.01
//! step_size = 0.01
//! ```

use crate::error::{PlanError, PlanResult};
use serde::{Deserialize, Serialize};

/// Default number of nearest neighbors queried per expansion
pub const DEFAULT_KNN_NUM: usize = 10;

/// Default bisection budget for one bubble connection
pub const DEFAULT_MAX_CONNECT_PARAM: usize = 128;

/// Default minimum clearance for a configuration to count as free
pub const DEFAULT_MIN_CLEARANCE: f64 = 0.01;

/// Default interpolation step for the step-sampling tree
pub const DEFAULT_STEP_SIZE: f64 = 0.01;

/// Build parameters of one planning query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerParams {
    /// Neighbor fan-out of every expansion
    pub knn_num: usize,
    /// Maximum mid-bubble constructions while certifying one edge
    pub max_connect_param: usize,
    /// Clearance below which a configuration is treated as colliding
    pub min_clearance: f64,
    /// Interpolation step of [`StepTree`](crate::tree::StepTree)
    pub step_size: f64,
}

impl Default for PlannerParams {
    fn default() -> Self {
        Self {
            knn_num: DEFAULT_KNN_NUM,
            max_connect_param: DEFAULT_MAX_CONNECT_PARAM,
            min_clearance: DEFAULT_MIN_CLEARANCE,
            step_size: DEFAULT_STEP_SIZE,
        }
    }
}

impl PlannerParams {
    /// Parse parameters from a TOML document, filling missing fields with defaults
    pub fn from_toml_str(content: &str) -> PlanResult<Self> {
        let params: Self = toml::from_str(content)?;
        params.validate()?;
        Ok(params)
    }

    /// Set neighbor fan-out
    pub fn with_knn_num(mut self, knn_num: usize) -> Self {
        self.knn_num = knn_num;
        self
    }

    /// Set bisection budget
    pub fn with_max_connect_param(mut self, max_connect_param: usize) -> Self {
        self.max_connect_param = max_connect_param;
        self
    }

    /// Set minimum clearance threshold
    pub fn with_min_clearance(mut self, min_clearance: f64) -> Self {
        self.min_clearance = min_clearance;
        self
    }

    /// Set interpolation step size
    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    /// Check that every parameter is usable
    pub fn validate(&self) -> PlanResult<()> {
        if self.knn_num == 0 {
            return Err(PlanError::invalid("knn_num must be at least 1"));
        }
        if self.max_connect_param == 0 {
            return Err(PlanError::invalid("max_connect_param must be at least 1"));
        }
        if !self.min_clearance.is_finite() || self.min_clearance < 0.0 {
            return Err(PlanError::invalid(format!(
                "min_clearance must be finite and non-negative, got {}",
                self.min_clearance
            )));
        }
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(PlanError::invalid(format!(
                "step_size must be finite and positive, got {}",
                self.step_size
            )));
        }
        Ok(())
    }
}
