//! Fixed-layout text report

use std::fmt::Write;

use super::analysis::SuitabilityAnalysis;

/// Render the analysis as a human readable report.
///
/// Strength, limitation and data gap sections are left out when empty.
#[must_use]
pub fn render_report(analysis: &SuitabilityAnalysis) -> String {
    let mut out = String::new();
    write_report(&mut out, analysis).ok();
    out
}

fn write_report(out: &mut String, analysis: &SuitabilityAnalysis) -> std::fmt::Result {
    let climate = &analysis.climate;
    let soil = &analysis.soil;
    let terrain = &analysis.terrain;
    let overall = &analysis.overall;

    writeln!(out, "📍 QUINOA CROP SUITABILITY ANALYSIS")?;
    writeln!(
        out,
        "Location: {:.4}°, {:.4}°",
        analysis.coordinate.latitude, analysis.coordinate.longitude
    )?;
    writeln!(out, "Climate window: {}", analysis.window)?;

    writeln!(out)?;
    writeln!(out, "🌡️ CLIMATE")?;
    writeln!(
        out,
        "• Mean temperature: {:.1}°C (min {:.1}°C, max {:.1}°C)",
        climate.measurement.temperature_mean,
        climate.measurement.temperature_min,
        climate.measurement.temperature_max
    )?;
    writeln!(
        out,
        "• Annual precipitation: {:.0} mm",
        climate.measurement.precipitation_annual
    )?;
    writeln!(
        out,
        "• Aridity index: {:.2} ({})",
        climate.measurement.aridity_index, climate.aridity_class
    )?;
    writeln!(
        out,
        "• Solar radiation: {:.1} MJ/m²/day",
        climate.measurement.solar_radiation_mean
    )?;
    writeln!(
        out,
        "• Climate suitability: {} ({:.0}%) {}/{}",
        climate.score.suitability,
        climate.score.suitability_percent,
        climate.score.total,
        climate.score.max
    )?;

    writeln!(out)?;
    writeln!(out, "🌱 SOIL")?;
    writeln!(out, "• Texture: {}", soil.measurement.texture)?;
    writeln!(out, "• pH: {:.1} ({})", soil.measurement.ph, soil.ph_level)?;
    writeln!(
        out,
        "• Organic matter: {:.1} g/kg ({} fertility)",
        soil.measurement.organic_matter, soil.fertility
    )?;
    writeln!(out, "• Drainage: {}", soil.measurement.drainage)?;
    writeln!(
        out,
        "• Soil suitability: {} ({:.0}%) {}/{}",
        soil.score.suitability, soil.score.suitability_percent, soil.score.total, soil.score.max
    )?;

    writeln!(out)?;
    writeln!(out, "⛰️ TERRAIN")?;
    writeln!(out, "• Elevation: {:.0} m a.s.l.", terrain.measurement.elevation)?;
    writeln!(
        out,
        "• Slope: {:.1}° ({})",
        terrain.measurement.slope, terrain.slope_class
    )?;
    writeln!(out, "• Aspect: {}", terrain.measurement.aspect)?;
    writeln!(
        out,
        "• Terrain suitability: {} ({:.0}%) {}/{}",
        terrain.score.suitability,
        terrain.score.suitability_percent,
        terrain.score.total,
        terrain.score.max
    )?;

    writeln!(out)?;
    writeln!(out, "📊 OVERALL ASSESSMENT")?;
    writeln!(
        out,
        "• Overall suitability: {} {} ({:.0}%)",
        overall.suitability.emoji(),
        overall.suitability,
        overall.suitability_percent
    )?;
    writeln!(out, "• Score: {}/{}", overall.total_score, overall.max_score)?;

    write_list(out, "✅ STRENGTHS:", &overall.strengths)?;
    write_list(out, "⚠️ LIMITATIONS:", &overall.limitations)?;

    let gaps: Vec<String> = analysis.data_gaps.iter().map(ToString::to_string).collect();
    write_list(out, "❔ MISSING DATA (scored as 0):", &gaps)?;

    writeln!(out)?;
    writeln!(out, "💡 RECOMMENDATION:")?;
    write!(out, "{}", overall.recommendation)
}

fn write_list(out: &mut String, heading: &str, items: &[String]) -> std::fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "{heading}")?;
    for item in items {
        writeln!(out, "  • {item}")?;
    }
    Ok(())
}
