mod rabbit;
mod publisher;

pub use rabbit::{build_pool, Pool, RabbitError};
pub use publisher::{PublisherError, RabbitPublisher, RequestSink, Topology};
