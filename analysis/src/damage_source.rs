use common::UserStats;

/// Everything the game attributes damage to, weapons as well as world
/// hazards and charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DamageSource {
    Default,
    Ap25,
    Blktar,
    Pk57,
    Gruber,
    Gat9,
    Sabr,
    Dl12,
    Kr82m,
    Ls45,
    Nack11,
    Mawp,
    Ingmar57,
    F1Legros,
    Tub,
    AutoShotgun,
    ShortShotgun,
    Kr82u,
    TechnicalKr82,
    GruberSd,
    FragGrenade,
    MolotovCocktail,
    Chemical,
    BarbedWire,
    Fans,
    Fire,
    Pit,
    DoorCharge,
    WallCharge,
    Uav,
}

pub static DAMAGE_SOURCES: phf::Map<u16, DamageSource> = phf::phf_map! {
    0_u16 => DamageSource::Default,
    1_u16 => DamageSource::Ap25,
    2_u16 => DamageSource::Blktar,
    3_u16 => DamageSource::Pk57,
    4_u16 => DamageSource::Gruber,
    5_u16 => DamageSource::Gat9,
    6_u16 => DamageSource::Sabr,
    7_u16 => DamageSource::Dl12,
    8_u16 => DamageSource::Kr82m,
    9_u16 => DamageSource::Ls45,
    10_u16 => DamageSource::Nack11,
    11_u16 => DamageSource::Mawp,
    12_u16 => DamageSource::Ingmar57,
    13_u16 => DamageSource::F1Legros,
    14_u16 => DamageSource::Tub,
    15_u16 => DamageSource::AutoShotgun,
    16_u16 => DamageSource::ShortShotgun,
    17_u16 => DamageSource::Kr82u,
    18_u16 => DamageSource::TechnicalKr82,
    19_u16 => DamageSource::GruberSd,
    50_u16 => DamageSource::FragGrenade,
    51_u16 => DamageSource::MolotovCocktail,
    100_u16 => DamageSource::Chemical,
    101_u16 => DamageSource::BarbedWire,
    102_u16 => DamageSource::Fans,
    103_u16 => DamageSource::Fire,
    104_u16 => DamageSource::Pit,
    150_u16 => DamageSource::DoorCharge,
    151_u16 => DamageSource::WallCharge,
    152_u16 => DamageSource::Uav,
};

impl DamageSource {
    pub fn name(&self) -> &'static str {
        match self {
            DamageSource::Default => "DEFAULT",
            DamageSource::Ap25 => "AP25",
            DamageSource::Blktar => "BLKTAR",
            DamageSource::Pk57 => "PK57",
            DamageSource::Gruber => "GRUBER",
            DamageSource::Gat9 => "GAT9",
            DamageSource::Sabr => "SABR",
            DamageSource::Dl12 => "DL12",
            DamageSource::Kr82m => "KR82M",
            DamageSource::Ls45 => "LS45",
            DamageSource::Nack11 => "NACK11",
            DamageSource::Mawp => "MAWP",
            DamageSource::Ingmar57 => "INGMAR57",
            DamageSource::F1Legros => "F1LEGROS",
            DamageSource::Tub => "TUB",
            DamageSource::AutoShotgun => "AUTOSHOTGUN",
            DamageSource::ShortShotgun => "SHORTSHOTGUN",
            DamageSource::Kr82u => "KR82U",
            DamageSource::TechnicalKr82 => "TECHNICALKR82",
            DamageSource::GruberSd => "GRUBERSD",
            DamageSource::FragGrenade => "FRAG_GRENADE",
            DamageSource::MolotovCocktail => "MOLOTOV_COCKTAIL",
            DamageSource::Chemical => "CHEMICAL",
            DamageSource::BarbedWire => "BARBEDWIRE",
            DamageSource::Fans => "FANS",
            DamageSource::Fire => "FIRE",
            DamageSource::Pit => "PIT",
            DamageSource::DoorCharge => "DOOR_CHARGE",
            DamageSource::WallCharge => "WALL_CHARGE",
            DamageSource::Uav => "UAV",
        }
    }
}

/// The source the user dealt the largest share of their damage with, or
/// `None` if the user never dealt damage or only with unknown weapon ids.
pub fn favorite_weapon(stats: &UserStats) -> Option<DamageSource> {
    let mut favorite: Option<(u16, f64)> = None;
    for (&weapon_id, &share) in &stats.weapon_damage_share {
        if favorite.map(|(_, best)| share > best).unwrap_or(true) {
            favorite = Some((weapon_id, share));
        }
    }
    favorite.and_then(|(weapon_id, _)| DAMAGE_SOURCES.get(&weapon_id).copied())
}
