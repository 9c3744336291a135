//! Built-in sample packs.
//!
//! Each pack holds eight samples. Sample ids are global across packs, so a
//! shared pattern can name a sample without also naming its pack.

use crate::SampleId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleHeader {
    pub id: SampleId,
    pub name: &'static str,
    pub emoji: &'static str,
    /// Asset path relative to the audio root, e.g. `0/1_clap.mp3`.
    pub file: &'static str,
    /// Level correction applied by the engine, in dB.
    pub gain_adjustment: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackHeader {
    pub name: &'static str,
    pub samples: &'static [SampleHeader],
}

const fn sample(id: u8, name: &'static str, emoji: &'static str, file: &'static str) -> SampleHeader {
    SampleHeader {
        id: SampleId::new(id),
        name,
        emoji,
        file,
        gain_adjustment: 0.0,
    }
}

const fn boosted(
    id: u8,
    name: &'static str,
    emoji: &'static str,
    file: &'static str,
    gain_adjustment: f32,
) -> SampleHeader {
    SampleHeader {
        id: SampleId::new(id),
        name,
        emoji,
        file,
        gain_adjustment,
    }
}

pub static PACKS: [PackHeader; 4] = [
    PackHeader {
        name: "0",
        samples: &[
            boosted(0, "kick", "🥾", "0/0_kick-909.mp3", 2.0),
            sample(1, "clap", "👏", "0/1_clap.mp3"),
            sample(2, "snare", "🪤", "0/2_snare.mp3"),
            sample(3, "closed hat", "🪖", "0/3_ch2.mp3"),
            sample(4, "open hat", "🧢", "0/4_oh.mp3"),
            sample(5, "tom", "👨", "0/5_tom.mp3"),
            sample(6, "cowbell", "🐮", "0/6_cow.mp3"),
            sample(7, "yeah", "👍", "0/7_yeah.mp3"),
        ],
    },
    PackHeader {
        name: "1",
        samples: &[
            sample(8, "kick", "🛼", "1/0_kick-505.mp3"),
            sample(9, "rim", "🪵", "1/1_rim.mp3"),
            sample(10, "closed hat", "🎩", "1/2_ch.mp3"),
            sample(11, "shaker", "🪇", "1/3_shaker.mp3"),
            sample(12, "crash", "💥", "1/4_crash.mp3"),
            sample(13, "droplet", "💧", "1/5_droplet.mp3"),
            sample(14, "spring", "🫨", "1/6_spring.mp3"),
            boosted(15, "mhm", "💅", "1/7_mhm.mp3", -1.0),
        ],
    },
    PackHeader {
        name: "2",
        samples: &[
            sample(16, "house", "🏠", "2/0_house.mp3"),
            boosted(17, "hut", "🛖", "2/1_hut.mp3", 6.0),
            sample(18, "bass", "🔈", "2/2_bass.mp3"),
            sample(19, "yoga", "🧘", "2/3_yoga.mp3"),
            sample(20, "standup", "🎸", "2/4_standup.mp3"),
            sample(21, "flute", "🪈", "2/5_flute.mp3"),
            sample(22, "rhodes", "🚗", "2/6_rhodes.mp3"),
            sample(23, "climb", "🧗", "2/7_climb.mp3"),
        ],
    },
    PackHeader {
        name: "3",
        samples: &[
            sample(24, "i love you", "🥰", "3/0_i-love-you.mp3"),
            sample(25, "spaceship", "🛸", "3/1_spaceship.mp3"),
            sample(26, "ice", "🧊", "3/2_ice.mp3"),
            sample(27, "sonar", "🐋", "3/3_sonar.mp3"),
            sample(28, "tink", "🥂", "3/4_tink.mp3"),
            sample(29, "woof", "🐶", "3/5_woof.mp3"),
            sample(30, "shh", "🤫", "3/6_shh.mp3"),
            sample(31, "scream", "😱", "3/7_scream.mp3"),
        ],
    },
];

pub fn pack(index: usize) -> Option<&'static PackHeader> {
    PACKS.get(index)
}

/// Look up a sample header by its global id.
pub fn sample_header(id: SampleId) -> Option<&'static SampleHeader> {
    PACKS
        .iter()
        .flat_map(|p| p.samples.iter())
        .find(|s| s.id == id)
}
