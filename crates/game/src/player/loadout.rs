use serde::{Deserialize, Serialize};

pub const DEFAULT_SKIN: &str = "#4ecdc4";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
#[rkyv(derive(Debug))]
pub enum Weapon {
    #[default]
    Ak,
    Shotgun,
    Sniper,
    Sniper2,
    Smg,
    Pistol,
    Revolver,
    RevolverSmall,
    GrenadeLauncher,
    RocketLauncher,
    ShortCannon,
    Knife1,
    Knife2,
    Shovel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponClass {
    Rifle,
    Shotgun,
    Sniper,
    Sidearm,
    Launcher,
    Cannon,
    Melee,
}

impl WeaponClass {
    pub fn damage(self) -> u8 {
        match self {
            Self::Rifle => 10,
            Self::Shotgun => 20,
            Self::Sniper => 35,
            Self::Sidearm => 12,
            Self::Launcher => 40,
            Self::Cannon => 30,
            Self::Melee => 25,
        }
    }
}

impl Weapon {
    pub const ALL: [Weapon; 14] = [
        Self::Ak,
        Self::Shotgun,
        Self::Sniper,
        Self::Sniper2,
        Self::Smg,
        Self::Pistol,
        Self::Revolver,
        Self::RevolverSmall,
        Self::GrenadeLauncher,
        Self::RocketLauncher,
        Self::ShortCannon,
        Self::Knife1,
        Self::Knife2,
        Self::Shovel,
    ];

    /// Asset identifier, also used when a weapon is chosen by name.
    pub fn id(self) -> &'static str {
        match self {
            Self::Ak => "AK",
            Self::Shotgun => "Shotgun",
            Self::Sniper => "Sniper",
            Self::Sniper2 => "Sniper_2",
            Self::Smg => "SMG",
            Self::Pistol => "Pistol",
            Self::Revolver => "Revolver",
            Self::RevolverSmall => "Revolver_Small",
            Self::GrenadeLauncher => "GrenadeLauncher",
            Self::RocketLauncher => "RocketLauncher",
            Self::ShortCannon => "ShortCannon",
            Self::Knife1 => "Knife_1",
            Self::Knife2 => "Knife_2",
            Self::Shovel => "Shovel",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Ak => "AK-47",
            Self::Shotgun => "Shotgun",
            Self::Sniper => "Sniper Rifle",
            Self::Sniper2 => "Heavy Sniper",
            Self::Smg => "SMG",
            Self::Pistol => "Pistol",
            Self::Revolver => "Revolver",
            Self::RevolverSmall => "Snub Revolver",
            Self::GrenadeLauncher => "Grenade Launcher",
            Self::RocketLauncher => "Rocket Launcher",
            Self::ShortCannon => "Short Cannon",
            Self::Knife1 => "Knife",
            Self::Knife2 => "Combat Knife",
            Self::Shovel => "Shovel",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|weapon| weapon.id() == id)
    }

    pub fn class(self) -> WeaponClass {
        match self {
            Self::Ak | Self::Smg => WeaponClass::Rifle,
            Self::Shotgun => WeaponClass::Shotgun,
            Self::Sniper | Self::Sniper2 => WeaponClass::Sniper,
            Self::Pistol | Self::Revolver | Self::RevolverSmall => WeaponClass::Sidearm,
            Self::GrenadeLauncher | Self::RocketLauncher => WeaponClass::Launcher,
            Self::ShortCannon => WeaponClass::Cannon,
            Self::Knife1 | Self::Knife2 | Self::Shovel => WeaponClass::Melee,
        }
    }

    pub fn damage(self) -> u8 {
        self.class().damage()
    }
}

/// Cosmetic and weapon choice made in the lobby. Fixed for the rest of the session.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
#[rkyv(derive(Debug))]
pub struct Loadout {
    pub weapon: Weapon,
    pub skin: String,
    pub name: String,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            weapon: Weapon::default(),
            skin: DEFAULT_SKIN.to_string(),
            name: String::from("player"),
        }
    }
}

impl Loadout {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = weapon;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_resolve_back_to_weapons() {
        for weapon in Weapon::ALL {
            assert_eq!(Weapon::from_id(weapon.id()), Some(weapon));
        }
        assert_eq!(Weapon::from_id("Railgun"), None);
    }

    #[test]
    fn default_loadout() {
        let loadout = Loadout::default();
        assert_eq!(loadout.weapon, Weapon::Ak);
        assert_eq!(loadout.weapon.damage(), 10);
        assert_eq!(loadout.skin, "#4ecdc4");
    }
}
