//! Query subcommand implementations: fetch from the backend and print.

use ars_api::ApiClient;

pub async fn run_municipalities(client: &ApiClient) -> anyhow::Result<()> {
    let municipalities = client.municipalities().await?;
    log::info!("fetched {} municipalities", municipalities.len());
    println!("{:<6} {:<24} {:>10} {:>10}", "ID", "MUNICIPIO", "LAT", "LNG");
    for m in &municipalities {
        println!(
            "{:<6} {:<24} {:>10.4} {:>10.4}",
            m.id, m.name, m.latitude, m.longitude
        );
    }
    println!("\n{} municipios", municipalities.len());
    Ok(())
}

pub async fn run_years(client: &ApiClient, municipality: u32) -> anyhow::Result<()> {
    let response = client.available_years(municipality).await?;
    println!("Años disponibles para {}:", response.municipality);
    for year in &response.years {
        println!("  {year}");
    }
    Ok(())
}

pub async fn run_stations(
    client: &ApiClient,
    municipality: u32,
    year: Option<i32>,
) -> anyhow::Result<()> {
    let stations = match year {
        Some(y) => {
            let response = client.stations_for_year(municipality, y).await?;
            println!("{} estaciones operativas en {y}", response.total);
            response.stations
        }
        None => client.stations(municipality).await?,
    };
    println!("{:<6} {:<28} {:>10} {:>10}  {}", "ID", "ESTACIÓN", "LAT", "LNG", "TIPO");
    for s in &stations {
        println!(
            "{:<6} {:<28} {:>10.4} {:>10.4}  {}",
            s.id,
            s.name,
            s.latitude,
            s.longitude,
            s.station_type.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

pub async fn run_pollutants(client: &ApiClient, station: u32, year: i32) -> anyhow::Result<()> {
    let response = client.pollutants(station, year).await?;
    println!("{:<6} {}", "ID", "OPCIÓN");
    for option in response.options() {
        println!("{:<6} {}", option.exposure_id, option.label);
    }
    println!("\n{} contaminantes", response.total);
    Ok(())
}

pub async fn run_summary(
    client: &ApiClient,
    station: u32,
    year: i32,
    exposure: u32,
) -> anyhow::Result<()> {
    let summary = client.reading_summary(station, year, exposure).await?;
    let stats = &summary.statistics;
    println!(
        "{} ({}) — {}",
        summary.pollutant.symbol, summary.pollutant.exposure.text, summary.classification.level
    );
    println!("  Promedio:      {:>10.2} {}", stats.mean, summary.pollutant.units);
    println!("  Máximo:        {:>10.2} {}", stats.max, summary.pollutant.units);
    println!("  Mínimo:        {:>10.2} {}", stats.min, summary.pollutant.units);
    println!("  Mediana:       {:>10.2} {}", stats.median, summary.pollutant.units);
    println!("  Percentil 98:  {:>10.2} {}", stats.percentile_98, summary.pollutant.units);
    if let Some(peak) = &stats.peak_time {
        println!("  Pico máximo:   {peak}");
    }
    println!(
        "  Excedencias:   {} días ({:.2}%)",
        summary.exceedances.days, summary.exceedances.percentage
    );
    if let Some(who) = &summary.classification.who_limits {
        println!(
            "  Límites OMS ({}h): buena ≤ {}, regular ≤ {} [{}]",
            who.hours, who.good, who.moderate, who.source
        );
    }
    println!(
        "  Representatividad temporal: {:.1}%",
        summary.data_quality.temporal_coverage
    );
    Ok(())
}

pub async fn run_dictionary(client: &ApiClient) -> anyhow::Result<()> {
    let entries = client.dictionary().await?;
    for entry in &entries {
        println!("{} — {}", entry.symbol, entry.name);
        println!("  Qué es:        {}", entry.what_is_it);
        println!("  Causas:        {}", entry.causes);
        println!("  Consecuencias: {}", entry.consequences);
        println!();
    }
    println!("{} entradas", entries.len());
    Ok(())
}
