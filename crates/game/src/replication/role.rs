#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Owns physics, combat and every replicated field.
    Host,
    /// Mirrors replicated fields and sends only its own intent upstream.
    Guest,
}

impl Role {
    pub fn from_host_flag(is_host: bool) -> Self {
        if is_host { Self::Host } else { Self::Guest }
    }

    pub fn is_host(self) -> bool {
        self == Self::Host
    }
}
