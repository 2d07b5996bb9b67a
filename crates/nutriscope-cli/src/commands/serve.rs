pub fn run(host: &str, port: u16, data: &str) {
    let table = super::load_table(data);

    let base = format!("http://{host}:{port}");
    let report = table.report();

    println!("🥗 NutriScope Server v{}", nutriscope_core::VERSION);
    println!("   {base}");
    println!(
        "   {} of {} recipes retained from {data}",
        report.retained, report.rows_read
    );
    println!();
    println!("   Endpoints:");
    println!("     GET /                                API index (try: curl {base})");
    println!("     GET /health                          Row counts");
    println!("     GET /api/v1/recipes                  Sidebar recipe names");
    println!("     GET /api/v1/views/nutrient-profile   Calories vs health score");
    println!("     GET /api/v1/views/heatmap            Nutrient heat map + statistics");
    println!("     GET /api/v1/views/popularity         Time and steps vs rating");
    println!("     GET /api/v1/views/nutrient-impact    Rating by nutrient level");
    println!("     GET /api/v1/views/health-rating      Health score range vs rating band");
    println!("     GET /api/v1/views/health-popularity  Health score vs rating");
    println!("     GET /api/v1/views/overview           Summary figure");
    println!();
    println!("   Examples:");
    println!("     curl {base}/api/v1/views/nutrient-profile?selected=0");
    println!("     curl {base}/api/v1/views/heatmap?nutrient=all");
    println!();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(nutriscope_server::run_server(table, host, port)) {
        eprintln!("Server error on {base}: {e}");
        std::process::exit(1);
    }
}
