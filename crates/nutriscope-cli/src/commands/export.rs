use std::fs::File;
use std::io::BufWriter;

pub fn run(data: &str, output_path: &str) {
    let table = super::load_table(data);

    let file = match File::create(output_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to create {output_path}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = table.write_csv(BufWriter::new(file)) {
        eprintln!("Failed to write {output_path}: {e}");
        std::process::exit(1);
    }

    println!("Exported {} prepared recipes to {output_path}", table.len());
}
