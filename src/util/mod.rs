pub mod schedule;

pub use schedule::{Scheduler, TaskHandle};
