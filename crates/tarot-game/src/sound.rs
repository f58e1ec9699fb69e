//! Sound cues and the player's audio settings.

use tarot_engine::SoundEvent;

/// One-shot sound effects. Ids match the `event_id`s in the asset manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    Button,
    Door,
    CardMove,
    CardSpread,
    Typewriter,
    Wind,
}

impl Sfx {
    pub const ALL: [Sfx; 6] = [
        Sfx::Button,
        Sfx::Door,
        Sfx::CardMove,
        Sfx::CardSpread,
        Sfx::Typewriter,
        Sfx::Wind,
    ];

    pub fn event(self) -> SoundEvent {
        SoundEvent(match self {
            Sfx::Button => 1,
            Sfx::Door => 2,
            Sfx::CardMove => 3,
            Sfx::CardSpread => 4,
            Sfx::Typewriter => 5,
            Sfx::Wind => 6,
        })
    }

    /// Manifest name of the sound file.
    pub fn name(self) -> &'static str {
        match self {
            Sfx::Button => "button",
            Sfx::Door => "door",
            Sfx::CardMove => "card_move",
            Sfx::CardSpread => "card_spread",
            Sfx::Typewriter => "typewriter",
            Sfx::Wind => "wind",
        }
    }
}

const VOLUME_STEP: f32 = 0.1;

/// Music and effects switches and volumes, changed from the options menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundSettings {
    pub music_enabled: bool,
    pub sfx_enabled: bool,
    pub music_volume: f32,
    pub sfx_volume: f32,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sfx_enabled: true,
            music_volume: 0.5,
            sfx_volume: 0.5,
        }
    }
}

impl SoundSettings {
    pub fn toggle_music(&mut self) {
        self.music_enabled = !self.music_enabled;
    }

    pub fn toggle_sfx(&mut self) {
        self.sfx_enabled = !self.sfx_enabled;
    }

    /// Step music volume by one notch up (`+1`) or down (`-1`).
    pub fn step_music(&mut self, direction: f32) {
        self.music_volume = step_volume(self.music_volume, direction);
    }

    pub fn step_sfx(&mut self, direction: f32) {
        self.sfx_volume = step_volume(self.sfx_volume, direction);
    }
}

fn step_volume(volume: f32, direction: f32) -> f32 {
    let stepped = volume + VOLUME_STEP * direction.signum();
    // Snap to tenths so repeated steps land on clean values.
    ((stepped * 10.0).round() / 10.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_ids_are_unique() {
        let mut ids: Vec<u32> = Sfx::ALL.iter().map(|s| s.event().0).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), Sfx::ALL.len());
    }

    #[test]
    fn volume_steps_clamp() {
        let mut settings = SoundSettings::default();
        for _ in 0..20 {
            settings.step_music(1.0);
        }
        assert_eq!(settings.music_volume, 1.0);
        for _ in 0..3 {
            settings.step_sfx(-1.0);
        }
        assert!((settings.sfx_volume - 0.2).abs() < 1e-6);
        for _ in 0..5 {
            settings.step_sfx(-1.0);
        }
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn toggles_flip() {
        let mut settings = SoundSettings::default();
        settings.toggle_music();
        settings.toggle_sfx();
        assert!(!settings.music_enabled);
        assert!(!settings.sfx_enabled);
    }
}
