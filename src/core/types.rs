// shared identifiers and the closed catalogue of input record categories

/// Hero slot inside a match (0-9, five per team). Signed because chat
/// events use -1 for "no player".
pub type Slot = i64;

/// External player-slot encoding handed out by the metadata resolver.
pub type PlayerSlot = i64;

/// Every record type the replay parser is known to emit.
///
/// `Other` keeps the raw tag of anything outside the catalogue so it can
/// pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    // combat log
    Damage,
    Heal,
    ModifierAdd,
    ModifierRemove,
    Death,
    Ability,
    Item,
    Location,
    Gold,
    GameState,
    Xp,
    Purchase,
    Buyback,
    AbilityTrigger,
    PlayerStats,
    MultiKill,
    KillStreak,
    TeamBuildingKill,
    FirstBlood,
    ModifierRefresh,

    // chat messages
    RunePickup,
    RuneBottle,
    HeroKill,
    GlyphUsed,
    Paused,
    TowerKill,
    TowerDeny,
    BarracksKill,
    FirstBloodChat,
    Aegis,
    AegisStolen,
    DeniedAegis,
    RoshanKill,

    // parser generated
    Clicks,
    Pings,
    Actions,
    Chat,
    Interval,
    Obs,
    Sen,
    ObsLeft,
    SenLeft,

    Other(String),
}

impl Category {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "DOTA_COMBATLOG_DAMAGE" => Category::Damage,
            "DOTA_COMBATLOG_HEAL" => Category::Heal,
            "DOTA_COMBATLOG_MODIFIER_ADD" => Category::ModifierAdd,
            "DOTA_COMBATLOG_MODIFIER_REMOVE" => Category::ModifierRemove,
            "DOTA_COMBATLOG_DEATH" => Category::Death,
            "DOTA_COMBATLOG_ABILITY" => Category::Ability,
            "DOTA_COMBATLOG_ITEM" => Category::Item,
            "DOTA_COMBATLOG_LOCATION" => Category::Location,
            "DOTA_COMBATLOG_GOLD" => Category::Gold,
            "DOTA_COMBATLOG_GAME_STATE" => Category::GameState,
            "DOTA_COMBATLOG_XP" => Category::Xp,
            "DOTA_COMBATLOG_PURCHASE" => Category::Purchase,
            "DOTA_COMBATLOG_BUYBACK" => Category::Buyback,
            "DOTA_COMBATLOG_ABILITY_TRIGGER" => Category::AbilityTrigger,
            "DOTA_COMBATLOG_PLAYERSTATS" => Category::PlayerStats,
            "DOTA_COMBATLOG_MULTIKILL" => Category::MultiKill,
            "DOTA_COMBATLOG_KILLSTREAK" => Category::KillStreak,
            "DOTA_COMBATLOG_TEAM_BUILDING_KILL" => Category::TeamBuildingKill,
            "DOTA_COMBATLOG_FIRST_BLOOD" => Category::FirstBlood,
            "DOTA_COMBATLOG_MODIFIER_REFRESH" => Category::ModifierRefresh,

            "CHAT_MESSAGE_RUNE_PICKUP" => Category::RunePickup,
            "CHAT_MESSAGE_RUNE_BOTTLE" => Category::RuneBottle,
            "CHAT_MESSAGE_HERO_KILL" => Category::HeroKill,
            "CHAT_MESSAGE_GLYPH_USED" => Category::GlyphUsed,
            "CHAT_MESSAGE_PAUSED" => Category::Paused,
            "CHAT_MESSAGE_TOWER_KILL" => Category::TowerKill,
            "CHAT_MESSAGE_TOWER_DENY" => Category::TowerDeny,
            "CHAT_MESSAGE_BARRACKS_KILL" => Category::BarracksKill,
            "CHAT_MESSAGE_FIRSTBLOOD" => Category::FirstBloodChat,
            "CHAT_MESSAGE_AEGIS" => Category::Aegis,
            "CHAT_MESSAGE_AEGIS_STOLEN" => Category::AegisStolen,
            "CHAT_MESSAGE_DENIED_AEGIS" => Category::DeniedAegis,
            "CHAT_MESSAGE_ROSHAN_KILL" => Category::RoshanKill,

            "clicks" => Category::Clicks,
            "pings" => Category::Pings,
            "actions" => Category::Actions,
            "chat" => Category::Chat,
            "interval" => Category::Interval,
            "obs" => Category::Obs,
            "sen" => Category::Sen,
            "obs_left" => Category::ObsLeft,
            "sen_left" => Category::SenLeft,

            other => Category::Other(other.to_string()),
        }
    }
}
