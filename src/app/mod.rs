// Application layer: concrete pipelines wiring adapters and core logic together.

pub mod pipelines;
