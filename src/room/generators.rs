/// Trait for generating room identifiers
pub trait RoomIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 128-bit random room id rendered as 32 lowercase hex characters
pub struct RandomRoomIdGenerator;

impl RandomRoomIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomRoomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomIdGenerator for RandomRoomIdGenerator {
    fn generate(&self) -> String {
        format!("{:032x}", rand::random::<u128>())
    }
}
