use nutriscope_core::{PreparedTable, TimeCategory};

pub fn run(data: &str, json: bool) {
    let table = super::load_table(data);

    if json {
        match serde_json::to_string_pretty(&summary_json(&table)) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error encoding summary: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let report = table.report();
    println!("🥗 {data}");
    println!("   Rows read:            {}", report.rows_read);
    println!("   Dropped (incomplete): {}", report.dropped_incomplete);
    println!("   Dropped (range):      {}", report.dropped_out_of_range);
    println!("   Retained:             {}", report.retained);
    println!("   Sidebar recipes:      {}", table.sidebar_names().len());
    println!();
    println!("   {:<12} {:>8} {:>7}", "Category", "Recipes", "Share");
    println!("   {}", "─".repeat(29));
    for (category, count) in table.category_counts() {
        println!(
            "   {:<12} {:>8} {:>6.1}%",
            category.label(),
            count,
            share(count, table.len())
        );
    }
    println!();
    println!("   {:<12} {:>8}", "Prep time", "Recipes");
    println!("   {}", "─".repeat(21));
    for band in TimeCategory::ALL {
        let count = table
            .recipes()
            .iter()
            .filter(|r| r.time_category == Some(band))
            .count();
        println!("   {:<12} {:>8}", band.label(), count);
    }
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

fn summary_json(table: &PreparedTable) -> serde_json::Value {
    let categories: serde_json::Map<String, serde_json::Value> = table
        .category_counts()
        .into_iter()
        .map(|(c, n)| (c.label().to_string(), serde_json::Value::from(n)))
        .collect();
    serde_json::json!({
        "version": nutriscope_core::VERSION,
        "report": table.report(),
        "sidebar_recipes": table.sidebar_names().len(),
        "categories": categories,
    })
}
