use bitflags::bitflags;

bitflags! {
    /// Replicated player fields changed since the host last published them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DirtyFields: u8 {
        const POSITION = 1 << 0;
        const FACING = 1 << 1;
        const HEALTH = 1 << 2;
        const DEAD = 1 << 3;
        const KILLS = 1 << 4;
        const DEATHS = 1 << 5;
        const CHARACTER = 1 << 6;

        const VITALS = Self::HEALTH.bits() | Self::DEAD.bits() | Self::KILLS.bits() | Self::DEATHS.bits();
    }
}
