pub mod source;
pub mod projection;
pub mod notice;
pub mod controller;
pub mod scheduler;
pub mod clock;
pub mod now_serving;
pub mod runtime;

pub use source::{HttpQueueSource, QueueSource};
pub use notice::NoticeService;
pub use controller::QueueRefreshController;
pub use scheduler::ScheduledTask;
pub use clock::ClockService;
pub use now_serving::NowServingMonitor;
pub use runtime::QueueDisplayRuntime;
