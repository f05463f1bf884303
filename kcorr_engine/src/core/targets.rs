use crate::tracing_targets;

tracing_targets! {
    SCATTER = "scatter",
    SAMPLER = "sampler",
}
