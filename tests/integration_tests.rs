use anyhow::Result;
use std::io::{Cursor, Write};
use tempfile::TempDir;
use title_insights::utils::validation::Validate;
use title_insights::{
    AnalysisConfig, AnalysisEngine, EdaError, LocalStorage, SvgChartRenderer,
    TitleAnalysisPipeline,
};
use zip::write::{SimpleFileOptions, ZipWriter};

const TITLES_CSV: &str = "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description
s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,,United States,\"September 25, 2021\",2020,PG-13,90 min,Documentaries,A documentary.
s2,TV Show,Blood & Water,,Ama Qamata,South Africa,\"September 24, 2021\",2021,TV-MA,2 Seasons,\"International TV Shows, TV Dramas, TV Mysteries\",A drama.
s3,TV Show,Ganglands,Julien Leclercq,Sami Bouajila,,,2021,TV-MA,1 Season,\"Crime TV Shows, International TV Shows, TV Action & Adventure\",A heist.
s4,Movie,Sankofa,Haile Gerima,Kofi Ghanaba,\"United States, Ghana, Burkina Faso, United Kingdom, Germany, Ethiopia\",,1993,TV-MA,125 min,\"Dramas, Independent Movies, International Movies\",A period drama.
s5,Movie,The Starling,Theodore Melfi,Melissa McCarthy,United States,\"September 24, 2021\",2021,PG-13,104 min,\"Comedies, Dramas\",A comedy.
s6,Movie,Je Suis Karl,Christian Schwochow,Luna Wedler,\"Germany, Czech Republic\",\"September 23, 2021\",2021,TV-MA,127 min,\"Dramas, International Movies\",A thriller.
s7,Movie,Confessions of an Invisible Girl,Bruno Garotti,Klara Castanho,,\"September 22, 2021\",2021,TV-PG,91 min,\"Children & Family Movies, Comedies\",A teen film.
s8,Movie,Avvai Shanmughi,K.S. Ravikumar,Kamal Hassan,India,,1996,TV-PG,161 min,\"Comedies, International Movies\",A comedy.
";

fn write_archive(dir: &TempDir, name: &str) -> Result<String> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("netflix_titles.csv", SimpleFileOptions::default())?;
    zip.write_all(TITLES_CSV.as_bytes())?;
    let bytes = zip.finish()?.into_inner();

    let path = dir.path().join(name);
    std::fs::write(&path, bytes)?;
    Ok(path.to_string_lossy().into_owned())
}

fn config_for(archive: &str, output: &str, formats: &str) -> Result<AnalysisConfig> {
    let toml_content = format!(
        r#"
[dataset]
archive = "{}"

[crosstab]
top_countries = 3

[output]
path = "{}"
formats = [{}]
"#,
        archive.replace('\\', "/"),
        output.replace('\\', "/"),
        formats
    );
    Ok(AnalysisConfig::from_toml_str(&toml_content)?)
}

/// 完整流程：讀取 zip、補值、產生圖表與摘要
#[tokio::test]
async fn test_end_to_end_analysis() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let archive = write_archive(&temp_dir, "netflix-shows.zip")?;
    let output = temp_dir.path().join("output").to_string_lossy().into_owned();

    let config = config_for(&archive, &output, r#""svg", "csv", "json""#)?;
    config.validate()?;

    let pipeline = TitleAnalysisPipeline::new(
        LocalStorage::new(".".to_string()),
        config,
        SvgChartRenderer::new(),
    );
    let engine = AnalysisEngine::new(pipeline);
    let output_path = engine.run().await?;
    assert_eq!(output_path, output.replace('\\', "/"));

    let output_dir = std::path::Path::new(&output_path);
    for chart in [
        "01_countries_per_title.svg",
        "02_categories_per_title.svg",
        "03_categories.svg",
        "04_category_combinations.svg",
        "05_country_combinations.svg",
        "06_country_category_heatmap.svg",
    ] {
        assert!(output_dir.join(chart).exists(), "missing {}", chart);
    }

    let summary: serde_json::Value =
        serde_json::from_slice(&std::fs::read(output_dir.join("summary.json"))?)?;
    assert_eq!(summary["records"], 8);
    assert_eq!(summary["imputed_date_added"], 3);
    assert_eq!(summary["missing_before_imputation"]["country"], 2);
    assert_eq!(summary["missing_before_imputation"]["date_added"], 3);
    assert_eq!(summary["missing_before_imputation"]["cast"], 1);
    assert_eq!(summary["crosstab"]["top_k"], 3);

    // 熱圖只保留前三名國家，格子總和等於保留的展開列數
    let retained = summary["crosstab"]["retained_rows"].as_u64().unwrap();
    let counts = summary["crosstab"]["heatmap"]["table"]["counts"]
        .as_array()
        .unwrap();
    assert_eq!(counts.len(), 3);
    let total: u64 = counts
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .map(|c| c.as_u64().unwrap())
        .sum();
    assert_eq!(total, retained);

    let crosstab_csv = std::fs::read_to_string(output_dir.join("country_category_crosstab.csv"))?;
    assert!(crosstab_csv.starts_with("Country,"));
    assert!(crosstab_csv.contains("United States,"));

    Ok(())
}

#[tokio::test]
async fn test_missing_archive_aborts_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let archive = temp_dir.path().join("netflix-shows.zip").to_string_lossy().into_owned();
    let output = temp_dir.path().join("output").to_string_lossy().into_owned();

    let config = config_for(&archive, &output, r#""json""#)?;
    let pipeline = TitleAnalysisPipeline::new(
        LocalStorage::new(".".to_string()),
        config,
        SvgChartRenderer::new(),
    );

    let err = AnalysisEngine::new(pipeline).run().await.unwrap_err();
    assert!(matches!(err, EdaError::FileNotFound { .. }));
    assert!(err.recovery_suggestion().contains("kaggle"));

    // 失敗時不應寫出任何結果
    assert!(!temp_dir.path().join("output").exists());
    Ok(())
}

#[tokio::test]
async fn test_json_only_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let archive = write_archive(&temp_dir, "titles.zip")?;
    let output = temp_dir.path().join("json-only").to_string_lossy().into_owned();

    let config = config_for(&archive, &output, r#""json""#)?;
    let pipeline = TitleAnalysisPipeline::new(
        LocalStorage::new(".".to_string()),
        config,
        SvgChartRenderer::new(),
    );
    AnalysisEngine::new_with_monitoring(pipeline, false).run().await?;

    let entries: Vec<String> = std::fs::read_dir(&output)?
        .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<_>>()?;
    assert_eq!(entries, vec!["summary.json".to_string()]);
    Ok(())
}
