use std::io::Write;
use std::path::{Path, PathBuf};

/// Header of the smartphone dataset, in the column order of the public file.
pub const HEADER: &str = "brand_name,model,price,avg_rating,5G_or_not,processor_brand,num_cores,\
processor_speed,battery_capacity,fast_charging_available,fast_charging,ram_capacity,\
internal_memory,screen_size,refresh_rate,num_rear_cameras,os,primary_camera_rear,\
primary_camera_front,extended_memory_available,resolution_height,resolution_width";

/// One dataset row. Only the filtered columns are set explicitly; the
/// remaining feature columns get plausible mid-range values.
#[derive(Debug, Clone)]
pub struct PhoneRow {
    pub brand: &'static str,
    pub model: &'static str,
    pub price: Option<u32>,
    pub rating: Option<f64>,
    pub ram_gb: u32,
    pub battery_mah: u32,
    pub camera_mp: u32,
    pub rear_cameras: u32,
    pub processor_brand: &'static str,
    pub os: &'static str,
}

impl PhoneRow {
    pub fn new(brand: &'static str, model: &'static str, price: u32, rating: f64) -> Self {
        Self {
            brand,
            model,
            price: Some(price),
            rating: Some(rating),
            ram_gb: 8,
            battery_mah: 5000,
            camera_mp: 50,
            rear_cameras: 3,
            processor_brand: "snapdragon",
            os: "android",
        }
    }

    #[must_use]
    pub fn specs(mut self, ram_gb: u32, battery_mah: u32, camera_mp: u32, rear_cameras: u32) -> Self {
        self.ram_gb = ram_gb;
        self.battery_mah = battery_mah;
        self.camera_mp = camera_mp;
        self.rear_cameras = rear_cameras;
        self
    }

    #[must_use]
    pub fn platform(mut self, processor_brand: &'static str, os: &'static str) -> Self {
        self.processor_brand = processor_brand;
        self.os = os;
        self
    }

    #[must_use]
    pub fn without_price(mut self) -> Self {
        self.price = None;
        self
    }

    #[must_use]
    pub fn without_rating(mut self) -> Self {
        self.rating = None;
        self
    }

    /// Render as a CSV line matching [`HEADER`].
    pub fn to_csv_line(&self) -> String {
        let price = self.price.map(|p| p.to_string()).unwrap_or_default();
        let rating = self.rating.map(|r| r.to_string()).unwrap_or_default();
        format!(
            "{brand},{model},{price},{rating},1,{cpu},8,2.4,{battery},1,33,{ram},128,6.5,120,{rear},{os},{camera},16,1,2400,1080",
            brand = self.brand,
            model = self.model,
            cpu = self.processor_brand,
            battery = self.battery_mah,
            ram = self.ram_gb,
            rear = self.rear_cameras,
            os = self.os,
            camera = self.camera_mp,
        )
    }
}

/// The two-row dataset used by the end-to-end examples: a cheap samsung that
/// clears every default threshold and an expensive apple that does not.
pub fn samsung_and_apple() -> Vec<PhoneRow> {
    vec![
        PhoneRow::new("samsung", "Galaxy M34", 12000, 4.2).specs(8, 5000, 50, 3),
        PhoneRow::new("apple", "iPhone 14", 60000, 4.5)
            .specs(6, 3200, 48, 2)
            .platform("bionic", "ios"),
    ]
}

/// A slightly larger catalog with several brands and price points.
pub fn mixed_catalog() -> Vec<PhoneRow> {
    vec![
        PhoneRow::new("samsung", "Galaxy M34", 12000, 4.2).specs(8, 5000, 50, 3),
        PhoneRow::new("samsung", "Galaxy A54", 34000, 4.4).specs(8, 5000, 50, 3),
        PhoneRow::new("samsung", "Galaxy S23 Ultra", 125000, 4.8).specs(12, 5000, 200, 4),
        PhoneRow::new("xiaomi", "Redmi Note 12", 14999, 4.1).specs(6, 5000, 48, 3),
        PhoneRow::new("xiaomi", "Redmi 12C", 8999, 3.9).specs(4, 5000, 50, 2),
        PhoneRow::new("oneplus", "Nord CE 3", 26999, 4.3)
            .specs(8, 5000, 50, 3)
            .platform("dimensity", "android"),
        PhoneRow::new("realme", "Narzo 60", 17999, 4.0)
            .specs(8, 5000, 64, 2)
            .platform("dimensity", "android"),
        PhoneRow::new("apple", "iPhone 14", 60000, 4.5)
            .specs(6, 3200, 48, 2)
            .platform("bionic", "ios"),
        PhoneRow::new("apple", "iPhone 15 Pro", 130000, 4.7)
            .specs(8, 3274, 48, 3)
            .platform("bionic", "ios"),
        PhoneRow::new("motorola", "Edge 40", 29999, 4.3)
            .specs(8, 4400, 50, 2)
            .platform("dimensity", "android"),
    ]
}

/// Render rows as CSV text with the standard header.
pub fn to_csv(rows: &[PhoneRow]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_csv_line());
        out.push('\n');
    }
    out
}

/// Write rows as `smartphones.csv` in `dir` and return its path.
pub fn write_dataset(dir: &Path, rows: &[PhoneRow]) -> PathBuf {
    let path = dir.join("smartphones.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(to_csv(rows).as_bytes()).unwrap();
    path
}

/// Create a tempdir holding `smartphones.csv` with `rows`.
///
/// Returns the guard with the dataset path. The directory is removed when
/// the guard drops.
pub fn dataset_dir(rows: &[PhoneRow]) -> (tempfile::TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_dataset(tmp.path(), rows);
    (tmp, path)
}
