mod api;
mod html;
mod router;

pub(crate) use router::router;
