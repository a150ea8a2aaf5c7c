pub mod handler;
pub mod middleware;
pub mod serializer;
