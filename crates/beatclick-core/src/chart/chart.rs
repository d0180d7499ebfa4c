use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart::{Difficulty, HitObject, HitObjectState};
use crate::error::{Error, Result};

/// Ordered set of hit-objects generated for one track.
///
/// Immutable once built. Sessions copy the objects they mutate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub difficulty: Difficulty,
    objects: Vec<HitObject>,
}

impl Chart {
    pub fn from_objects(difficulty: Difficulty, objects: Vec<HitObject>) -> Self {
        Self {
            difficulty,
            objects,
        }
    }

    pub fn objects(&self) -> &[HitObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Latest expiry time in the chart, if any
    pub fn last_expiry(&self) -> Option<f64> {
        self.objects
            .iter()
            .map(|o| o.expiry_time)
            .max_by(|a, b| a.total_cmp(b))
    }

    /// Check the ordering invariant the scheduler relies on.
    ///
    /// Objects must be sorted by activation time, carry their sequence index as
    /// id, have finite times and start in `Pending`.
    pub fn validate(&self) -> Result<()> {
        let mut previous: Option<f64> = None;
        for (index, obj) in self.objects.iter().enumerate() {
            let invalid = |reason: String| Error::InvalidChart { index, reason };

            if obj.id != index {
                return Err(invalid(format!("id {} does not match position", obj.id)));
            }
            if !obj.activation_time.is_finite() || !obj.expiry_time.is_finite() {
                return Err(invalid("non-finite time".to_string()));
            }
            if obj.expiry_time < obj.activation_time {
                return Err(invalid(format!(
                    "expiry {:.3}s precedes activation {:.3}s",
                    obj.expiry_time, obj.activation_time
                )));
            }
            if obj.state != HitObjectState::Pending {
                return Err(invalid(format!("initial state is {}", obj.state)));
            }
            if let Some(prev) = previous {
                if obj.activation_time < prev {
                    return Err(invalid(format!(
                        "activation {:.3}s is earlier than previous {:.3}s",
                        obj.activation_time, prev
                    )));
                }
            }
            previous = Some(obj.activation_time);
        }
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
