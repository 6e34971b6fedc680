/// Elevation band used to tint terrain vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    DeepWater,
    Water,
    ValleyGrass,
    Grass,
    FoothillStone,
    MountainStone,
    HighStone,
    Snow,
}

impl Band {
    pub const ALL: [Band; 8] = [
        Band::DeepWater,
        Band::Water,
        Band::ValleyGrass,
        Band::Grass,
        Band::FoothillStone,
        Band::MountainStone,
        Band::HighStone,
        Band::Snow,
    ];

    /// Exclusive upper elevation of the band; snow is unbounded.
    pub fn upper(self) -> f32 {
        match self {
            Band::DeepWater => -25.0,
            Band::Water => -5.0,
            Band::ValleyGrass => 5.0,
            Band::Grass => 20.0,
            Band::FoothillStone => 40.0,
            Band::MountainStone => 70.0,
            Band::HighStone => 90.0,
            Band::Snow => f32::INFINITY,
        }
    }

    pub fn for_height(h: f32) -> Band {
        Band::ALL
            .into_iter()
            .find(|b| h < b.upper())
            .unwrap_or(Band::Snow)
    }

    pub fn rgb(self) -> [u8; 3] {
        let hex: u32 = match self {
            Band::DeepWater => 0x000080,
            Band::Water => 0x0077be,
            Band::ValleyGrass => 0x228b22,
            Band::Grass => 0x4a7c59,
            Band::FoothillStone => 0x8b7d6b,
            Band::MountainStone => 0x696969,
            Band::HighStone => 0x778899,
            Band::Snow => 0xffffff,
        };
        [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
    }
}
