//! Application layer containing the submission pipeline.
//!
//! `SubmissionPipeline` is the entry point for one form submission. It runs a
//! fixed sequence of stages, each of which either hands its result to the next
//! stage or ends the run with a `Rejection`. All per-request state lives on the
//! stack of a single `handle` call, so concurrent requests never share it.

pub mod pipeline;
