use serde::Serialize;
use std::fmt::Debug;

/// A value that can sit in view state under optimistic control.
pub trait ResourceValue: Clone + Debug + PartialEq + Serialize + Send + Sync + 'static {
    /// Wording used when a notification mentions this value.
    fn describe(&self) -> String;
}

impl ResourceValue for bool {
    fn describe(&self) -> String {
        if *self { "on" } else { "off" }.to_string()
    }
}

impl ResourceValue for i64 {
    fn describe(&self) -> String {
        self.to_string()
    }
}

impl ResourceValue for u32 {
    fn describe(&self) -> String {
        self.to_string()
    }
}
