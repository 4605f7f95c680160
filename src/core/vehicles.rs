use crate::core::Lab;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Every vehicle moves, each in its own way.
pub trait Vehicle: Send + Sync {
    fn travel(&self) -> String;
}

pub struct Car;
pub struct Plane;
pub struct Boat;

impl Vehicle for Car {
    fn travel(&self) -> String {
        "🚗 Driving on the road".to_string()
    }
}

impl Vehicle for Plane {
    fn travel(&self) -> String {
        "✈️ Flying in the sky".to_string()
    }
}

impl Vehicle for Boat {
    fn travel(&self) -> String {
        "⛵ Sailing on water".to_string()
    }
}

pub fn fleet() -> Vec<Box<dyn Vehicle>> {
    vec![Box::new(Car), Box::new(Plane), Box::new(Boat)]
}

pub struct VehiclesLab;

#[async_trait]
impl Lab for VehiclesLab {
    fn name(&self) -> &'static str {
        "vehicles"
    }

    async fn run(&self) -> Result<String> {
        let fleet = fleet();
        for vehicle in &fleet {
            // Each vehicle responds in its own way through the trait object.
            println!("{}", vehicle.travel());
        }
        Ok(format!("{} vehicles reported in", fleet.len()))
    }
}
