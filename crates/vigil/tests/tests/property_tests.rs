#[path = "property/determinism.rs"]
mod determinism;

#[path = "property/clamping.rs"]
mod clamping;

#[path = "property/quota.rs"]
mod quota;

#[path = "property/plan_hash.rs"]
mod plan_hash;

#[path = "property/suppression_scope.rs"]
mod suppression_scope;
