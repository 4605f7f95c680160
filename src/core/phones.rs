use crate::core::Lab;
use crate::utils::error::Result;
use async_trait::async_trait;

pub const MAX_BATTERY: u8 = 100;
const GAME_BATTERY_COST: u8 = 20;

/// The polymorphic seam of the hierarchy: both phone kinds answer calls,
/// each in its own voice.
pub trait Phone {
    fn call(&self, number: &str) -> String;
    fn battery(&self) -> u8;
}

#[derive(Debug, Clone)]
pub struct Smartphone {
    pub brand: String,
    pub model: String,
    pub storage_gb: u32,
    battery: u8,
}

impl Smartphone {
    pub fn new(brand: &str, model: &str, storage_gb: u32, battery: u8) -> Self {
        Self {
            brand: brand.to_string(),
            model: model.to_string(),
            storage_gb,
            // Battery level is a percentage; clamp at construction too.
            battery: battery.min(MAX_BATTERY),
        }
    }

    pub fn charge(&mut self, amount: u8) -> String {
        self.battery = self.battery.saturating_add(amount).min(MAX_BATTERY);
        format!("🔋 {} charged to {}%", self.model, self.battery)
    }
}

impl Phone for Smartphone {
    fn call(&self, number: &str) -> String {
        format!("📞 Calling {} from {}...", number, self.model)
    }

    fn battery(&self) -> u8 {
        self.battery
    }
}

/// A smartphone specialized for gaming: same battery rules, its own call
/// greeting, and a battery-hungry extra action.
#[derive(Debug, Clone)]
pub struct GamingPhone {
    base: Smartphone,
    pub cooling_system: String,
}

impl GamingPhone {
    pub fn new(
        brand: &str,
        model: &str,
        storage_gb: u32,
        battery: u8,
        cooling_system: &str,
    ) -> Self {
        Self {
            base: Smartphone::new(brand, model, storage_gb, battery),
            cooling_system: cooling_system.to_string(),
        }
    }

    pub fn charge(&mut self, amount: u8) -> String {
        self.base.charge(amount)
    }

    pub fn play_game(&mut self, game: &str) -> String {
        if self.base.battery > GAME_BATTERY_COST {
            self.base.battery -= GAME_BATTERY_COST;
            format!(
                "🎮 Playing {} on {}... Battery now {}%",
                game, self.base.model, self.base.battery
            )
        } else {
            format!("⚠️ Battery too low to play {}!", game)
        }
    }
}

impl Phone for GamingPhone {
    fn call(&self, number: &str) -> String {
        format!(
            "📞 Calling {} with Gaming Mode ON 🎮 using {}!",
            number, self.base.model
        )
    }

    fn battery(&self) -> u8 {
        self.base.battery
    }
}

pub struct PhonesLab;

#[async_trait]
impl Lab for PhonesLab {
    fn name(&self) -> &'static str {
        "phones"
    }

    async fn run(&self) -> Result<String> {
        let mut phone = Smartphone::new("Samsung", "Galaxy S23", 256, 75);
        let mut gaming_phone = GamingPhone::new("Asus", "ROG Phone 7", 512, 90, "Advanced Cooling");

        println!("{}", phone.call("+254730456789"));
        println!("{}", phone.charge(10));
        println!("{}", gaming_phone.call("+233730456789"));
        println!("{}", gaming_phone.play_game("Call of Duty Advanced Warfare"));
        println!("{}", gaming_phone.charge(15));

        Ok(format!(
            "Demo finished: {} at {}%, {} at {}%",
            phone.model,
            phone.battery(),
            gaming_phone.base.model,
            gaming_phone.battery()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_clamps_at_full() {
        let mut phone = Smartphone::new("Test", "Model X", 128, 95);
        phone.charge(30);
        assert_eq!(phone.battery(), MAX_BATTERY);

        // Battery never exceeds 100 after any charge amount.
        phone.charge(255);
        assert_eq!(phone.battery(), MAX_BATTERY);
    }

    #[test]
    fn test_constructor_clamps_battery() {
        let phone = Smartphone::new("Test", "Model X", 128, 250);
        assert_eq!(phone.battery(), MAX_BATTERY);
    }

    #[test]
    fn test_playing_drains_battery() {
        let mut phone = GamingPhone::new("Test", "Play One", 512, 50, "Fan");
        let message = phone.play_game("Chess");
        assert!(message.contains("Battery now 30%"));
        assert_eq!(phone.battery(), 30);
    }

    #[test]
    fn test_low_battery_refuses_to_play() {
        let mut phone = GamingPhone::new("Test", "Play One", 512, 20, "Fan");
        let message = phone.play_game("Chess");
        assert!(message.contains("too low"));
        // Declined games do not drain anything.
        assert_eq!(phone.battery(), 20);
    }

    #[test]
    fn test_call_is_overridden() {
        let plain = Smartphone::new("A", "Plain", 64, 50);
        let gaming = GamingPhone::new("B", "Gaming", 64, 50, "Fan");

        let number = "+100000000";
        assert!(plain.call(number).contains("from Plain"));
        assert!(gaming.call(number).contains("Gaming Mode ON"));
    }

    #[test]
    fn test_battery_never_leaves_range() {
        let mut phone = GamingPhone::new("Test", "Endurance", 256, 90, "Fan");
        for _ in 0..10 {
            phone.play_game("Marathon");
        }
        assert!(phone.battery() <= MAX_BATTERY);

        for _ in 0..10 {
            phone.charge(50);
        }
        assert!(phone.battery() <= MAX_BATTERY);
    }
}
