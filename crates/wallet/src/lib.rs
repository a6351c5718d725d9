//! Client-side core of the GoldSave wallet page: session/fetch-cycle state,
//! derived metrics, list pipelines, redemption calculator, challenge
//! evaluator, and the display-string view-models a renderer consumes.

pub mod challenges;
pub mod credentials;
pub mod derived;
pub mod pipeline;
pub mod redeem;
pub mod render;
pub mod routes;
pub mod rows;
pub mod session;
