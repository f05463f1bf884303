//! Internal module containing targets for the [tracing] crate

kcorr_engine::tracing_targets! {
    PLUGIN = "plugin",
    LAYOUT = "layout",
}
