use std::fmt;

/// One container of a pod found waiting in CrashLoopBackOff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashLoopMatch {
    pub pod_name: String,
    pub namespace: String,
    pub phase: String,
    pub container_name: String,
}

impl fmt::Display for CrashLoopMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PodName: {}, Namespace: {}, Phase: {}, Container: {}",
            self.pod_name, self.namespace, self.phase, self.container_name
        )
    }
}

/// Outcome of comparing a Deployment's current and requested replica counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalePlan {
    Unchanged,
    Down { from: i32, to: i32 },
    Up { from: i32, to: i32 },
}

impl ScalePlan {
    /// Negative requests are treated like no-ops rather than errors.
    pub fn new(current: i32, desired: i32) -> Self {
        if desired == current || desired < 0 {
            ScalePlan::Unchanged
        } else if desired < current {
            ScalePlan::Down {
                from: current,
                to: desired,
            }
        } else {
            ScalePlan::Up {
                from: current,
                to: desired,
            }
        }
    }
}
