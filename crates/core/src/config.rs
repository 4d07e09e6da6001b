/// How a recovered public key is turned into an account address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AddressScheme {
    /// Last 20 bytes of keccak-256 over the 64-byte public key.
    Keccak,
    /// Same as `Keccak`, with the high nibble of the first byte forced to
    /// `0x1` to mark a user (externally owned) account.
    #[default]
    UserTyped,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkConfig {
    pub name: &'static str,
    pub address_scheme: AddressScheme,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::conflux()
    }
}

impl NetworkConfig {
    pub fn conflux() -> Self {
        Self {
            name: "conflux",
            address_scheme: AddressScheme::UserTyped,
        }
    }

    pub fn ethereum() -> Self {
        Self {
            name: "ethereum",
            address_scheme: AddressScheme::Keccak,
        }
    }

    /// Looks up a preset by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "conflux" | "cfx" => Some(Self::conflux()),
            "ethereum" | "eth" => Some(Self::ethereum()),
            _ => None,
        }
    }
}
