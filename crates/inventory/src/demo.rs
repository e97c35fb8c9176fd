//! Demo catalogue used to seed a fresh browser's inventory.

use chrono::{DateTime, Utc};

use stockroom_core::OwnerId;

use crate::item::{ItemStatus, NewItem};

/// One catalogue row; owner and write time are stamped at seeding time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DemoItem {
    pub name: &'static str,
    pub description: &'static str,
    pub drawing: &'static str,
    pub quantity: i64,
    pub status: ItemStatus,
}

impl DemoItem {
    pub fn to_new_item(&self, owner_id: &OwnerId, now: DateTime<Utc>) -> NewItem {
        NewItem {
            name: self.name.to_string(),
            description: self.description.to_string(),
            drawing: self.drawing.to_string(),
            quantity: self.quantity,
            status: self.status,
            owner_id: owner_id.clone(),
            updated_at: Some(now),
        }
    }
}

/// Catalogue rows stamped for `owner_id`, in catalogue order.
pub fn demo_catalogue(owner_id: &OwnerId, now: DateTime<Utc>) -> Vec<NewItem> {
    DEMO_ITEMS.iter().map(|d| d.to_new_item(owner_id, now)).collect()
}

pub const DEMO_ITEMS: &[DemoItem] = &[
    DemoItem {
        name: "Cube",
        description: "A 6 sided shape",
        drawing: "cube.dwg",
        quantity: 10,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Laptop",
        description: "15-inch laptop with an Intel Core i7 processor and 16GB RAM",
        drawing: "/path/to/drawing/laptop.png",
        quantity: 10,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Office Chair",
        description: "Ergonomic office chair with adjustable height and lumbar support",
        drawing: "/path/to/drawing/office_chair.png",
        quantity: 5,
        status: ItemStatus::Slow,
    },
    DemoItem {
        name: "Projector",
        description: "Full HD 1080p projector with 3000 lumens brightness",
        drawing: "/path/to/drawing/projector.png",
        quantity: 2,
        status: ItemStatus::Unavailable,
    },
    DemoItem {
        name: "Wireless Keyboard",
        description: "Bluetooth wireless keyboard with rechargeable battery",
        drawing: "/path/to/drawing/keyboard.pdf",
        quantity: 15,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Coffee Machine",
        description: "Automatic coffee machine with multiple brew settings",
        drawing: "/path/to/drawing/coffee_machine.png",
        quantity: 3,
        status: ItemStatus::Slow,
    },
    DemoItem {
        name: "Engine",
        description: "V8 engine with 450 horsepower",
        drawing: "/path/to/drawing/car_parts/engine.pdf",
        quantity: 1,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Transmission",
        description: "6-speed automatic transmission",
        drawing: "/path/to/drawing/car_parts/transmission.dwg",
        quantity: 1,
        status: ItemStatus::Slow,
    },
    DemoItem {
        name: "Wheel Assembly",
        description: "18-inch alloy wheels with all-season tires",
        drawing: "/path/to/drawing/car_parts/wheel_assembly.dwg",
        quantity: 4,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Brake System",
        description: "ABS brake system with electronic brakeforce distribution",
        drawing: "/path/to/drawing/car_parts/brake_system.dwg",
        quantity: 1,
        status: ItemStatus::Unavailable,
    },
    DemoItem {
        name: "Car Seats",
        description: "Leather-upholstered, adjustable car seats",
        drawing: "/path/to/drawing/car_parts/car_seats.pdf",
        quantity: 5,
        status: ItemStatus::Slow,
    },
    DemoItem {
        name: "Dashboard",
        description: "Digital dashboard with infotainment system",
        drawing: "/path/to/drawing/car_parts/dashboard.png",
        quantity: 1,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Exhaust System",
        description: "Stainless steel exhaust system with catalytic converter",
        drawing: "/path/to/drawing/car_parts/exhaust_system.dwg",
        quantity: 1,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Headlights",
        description: "LED headlights with automatic high beam",
        drawing: "/path/to/drawing/car_parts/headlights.dwg",
        quantity: 2,
        status: ItemStatus::Unavailable,
    },
    DemoItem {
        name: "Battery",
        description: "12V automotive battery",
        drawing: "/path/to/drawing/car_parts/battery.dwg",
        quantity: 1,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Radiator",
        description: "Cooling radiator with integrated thermostat",
        drawing: "/path/to/drawing/car_parts/radiator.dwg",
        quantity: 1,
        status: ItemStatus::Slow,
    },
    DemoItem {
        name: "Bolt M6x30",
        description: "M6 size bolt, 30mm length, stainless steel",
        drawing: "/path/to/drawing/hardware/bolt_m6x30.dwg",
        quantity: 100,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Bolt M8x50",
        description: "M8 size bolt, 50mm length, galvanized steel",
        drawing: "/path/to/drawing/hardware/bolt_m8x50.dwg",
        quantity: 75,
        status: ItemStatus::Slow,
    },
    DemoItem {
        name: "Bolt M10x100",
        description: "M10 size bolt, 100mm length, high-tensile steel",
        drawing: "/path/to/drawing/hardware/bolt_m10x100.dwg",
        quantity: 50,
        status: ItemStatus::Unavailable,
    },
    DemoItem {
        name: "Nut M6",
        description: "M6 size nut, stainless steel, hexagonal shape",
        drawing: "/path/to/drawing/hardware/nut_m6.dwg",
        quantity: 200,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Nut M8",
        description: "M8 size nut, galvanized steel, hexagonal shape",
        drawing: "/path/to/drawing/hardware/nut_m8.dwg",
        quantity: 150,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Nut M10",
        description: "M10 size nut, high-tensile steel, hexagonal shape",
        drawing: "/path/to/drawing/hardware/nut_m10.dwg",
        quantity: 100,
        status: ItemStatus::Slow,
    },
    DemoItem {
        name: "Bolt M12x150",
        description: "M12 size bolt, 150mm length, alloy steel",
        drawing: "/path/to/drawing/hardware/bolt_m12x150.dwg",
        quantity: 30,
        status: ItemStatus::Slow,
    },
    DemoItem {
        name: "Nut M12",
        description: "M12 size nut, alloy steel, hexagonal shape",
        drawing: "/path/to/drawing/hardware/nut_m12.dwg",
        quantity: 60,
        status: ItemStatus::Unavailable,
    },
    DemoItem {
        name: "Bolt M4x20",
        description: "M4 size bolt, 20mm length, stainless steel",
        drawing: "/path/to/drawing/hardware/bolt_m4x20.dwg",
        quantity: 150,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Nut M4",
        description: "M4 size nut, stainless steel, hexagonal shape",
        drawing: "/path/to/drawing/hardware/nut_m4.dwg",
        quantity: 300,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Solar Panel",
        description: "100W monocrystalline solar panel",
        drawing: "/path/to/random/solar_panel.png",
        quantity: 20,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Acoustic Guitar",
        description: "Six-string acoustic guitar with spruce top",
        drawing: "/path/to/random/acoustic_guitar.png",
        quantity: 10,
        status: ItemStatus::Slow,
    },
    DemoItem {
        name: "LED Bulb",
        description: "10W E27 LED light bulb, warm white",
        drawing: "/path/to/random/led_bulb.png",
        quantity: 100,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Yoga Mat",
        description: "Eco-friendly, non-slip yoga mat",
        drawing: "/path/to/random/yoga_mat.png",
        quantity: 15,
        status: ItemStatus::Unavailable,
    },
    DemoItem {
        name: "Bluetooth Speaker",
        description: "Portable Bluetooth speaker with waterproof design",
        drawing: "/path/to/random/bluetooth_speaker.png",
        quantity: 25,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Digital Camera",
        description: "24MP digital SLR camera with 18-55mm lens kit",
        drawing: "/path/to/random/digital_camera.png",
        quantity: 5,
        status: ItemStatus::Slow,
    },
    DemoItem {
        name: "Electric Drill",
        description: "Cordless electric drill with variable speed control",
        drawing: "/path/to/random/electric_drill.png",
        quantity: 8,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Gardening Gloves",
        description: "Durable leather gardening gloves, one size fits all",
        drawing: "/path/to/random/gardening_gloves.png",
        quantity: 30,
        status: ItemStatus::Active,
    },
    DemoItem {
        name: "Telescope",
        description: "Refractor telescope with tripod and star map",
        drawing: "/path/to/random/telescope.png",
        quantity: 4,
        status: ItemStatus::Slow,
    },
    DemoItem {
        name: "Chess Set",
        description: "Wooden chess set with hand-carved pieces",
        drawing: "/path/to/random/chess_set.png",
        quantity: 12,
        status: ItemStatus::Active,
    },
];
