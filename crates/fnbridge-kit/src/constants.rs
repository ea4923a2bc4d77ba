/// Hostname assumed when a provider address is written as `namespace/type`.
pub const DEFAULT_PROVIDER_HOSTNAME: &str = "registry.fnbridge.dev";

/// Separator between the components hashed into a call identity.
pub const CALL_IDENTITY_SEPARATOR: &str = "|";
