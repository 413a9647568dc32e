use std::fs;
use std::io::Write;

/// Canonical sample catalog: (product, units sold, unit price).
const PRODUCTS: [(&str, f64, f64); 10] = [
    ("Wireless Mouse", 342.0, 19.99),
    ("Mechanical Keyboard", 518.0, 24.50),
    ("USB-C Dock", 127.0, 89.99),
    ("Monitor Arm", 274.0, 45.75),
    ("Laptop Sleeve", 615.0, 12.25),
    ("Noise-Cancelling Headset", 98.0, 129.99),
    ("Webcam Stand", 433.0, 22.40),
    ("Desk Mat", 206.0, 54.30),
    ("Ergonomic Wrist Rest", 389.0, 31.85),
    ("Cable Organizer Kit", 154.0, 67.50),
];

fn main() {
    let path = "data/sales_data.csv";
    fs::create_dir_all("data").expect("creating data directory");
    let mut file = fs::File::create(path).expect("creating sample file");

    writeln!(file, "Product,Units_Sold,Price").expect("writing header");
    for (name, units, price) in PRODUCTS {
        writeln!(file, "{name},{units:.0},{price:.2}").expect("writing row");
    }

    println!("Wrote {} sales records to {path}", PRODUCTS.len());
}
