use super::error::Result;
use super::model::{SwitchCurve, SwitchCurves, SwitchMeta};
use super::parse::{parse_curve, parse_switch_meta};
use super::source::{curve_path, switch_meta_path, CurveSource, ResourcePath, Stroke};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch `switchmeta.csv` and return one record per row, in file order.
pub async fn get_switch_meta_data<S: CurveSource + ?Sized>(source: &S) -> Result<Vec<SwitchMeta>> {
    let body = source.fetch_text(&switch_meta_path()).await?;
    parse_switch_meta(&body)
}

/// Fetch the downstroke curve for `name` and, when `show_upstroke` is set,
/// the upstroke curve after it. Either fetch failing fails the whole load.
pub async fn get_curve_data<S: CurveSource + ?Sized>(
    source: &S,
    name: &str,
    show_upstroke: bool,
) -> Result<SwitchCurves> {
    let downstroke = load_stroke(source, name, Stroke::Down).await?;

    let upstroke = if show_upstroke {
        Some(load_stroke(source, name, Stroke::Up).await?)
    } else {
        None
    };

    Ok(SwitchCurves {
        name: name.to_string(),
        downstroke,
        upstroke,
    })
}

async fn load_stroke<S: CurveSource + ?Sized>(
    source: &S,
    name: &str,
    stroke: Stroke,
) -> Result<SwitchCurve> {
    log::info!("Getting data for {name} {stroke}");
    let body = source.fetch_text(&curve_path(name, stroke)).await?;
    parse_curve(&body)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::data::error::LoadError;
    use crate::data::model::CurvePoint;

    /// Serves fixed bodies and records every path requested.
    #[derive(Default)]
    struct MemorySource {
        files: HashMap<ResourcePath, String>,
        requested: Mutex<Vec<ResourcePath>>,
    }

    impl MemorySource {
        fn with(mut self, path: ResourcePath, body: &str) -> Self {
            self.files.insert(path, body.to_string());
            self
        }

        fn requested(&self) -> Vec<ResourcePath> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CurveSource for MemorySource {
        async fn fetch_text(&self, path: &ResourcePath) -> Result<String> {
            self.requested.lock().unwrap().push(path.clone());
            self.files.get(path).cloned().ok_or(LoadError::Status {
                url: path.to_string(),
                status: StatusCode::NOT_FOUND,
            })
        }
    }

    fn switch_source() -> MemorySource {
        MemorySource::default()
            .with(switch_meta_path(), "A,lever\nB\n")
            .with(curve_path("A", Stroke::Down), "0,10\n1,20\n2,15")
            .with(curve_path("A", Stroke::Up), "2,12\n1,8\n0,3\n")
    }

    #[tokio::test]
    async fn loads_switch_meta_in_file_order() {
        let source = switch_source();
        let metas = get_switch_meta_data(&source).await.unwrap();
        assert_eq!(
            metas,
            vec![
                SwitchMeta::new("A", Some("lever".into())),
                SwitchMeta::new("B", None),
            ]
        );
    }

    #[tokio::test]
    async fn switch_meta_is_idempotent() {
        let source = switch_source();
        let first = get_switch_meta_data(&source).await.unwrap();
        let second = get_switch_meta_data(&source).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn downstroke_only_leaves_upstroke_unset() {
        let source = switch_source();
        let curves = get_curve_data(&source, "A", false).await.unwrap();

        assert_eq!(curves.name, "A");
        assert_eq!(
            curves.downstroke.data,
            vec![
                CurvePoint { x: 0.0, y: 10.0 },
                CurvePoint { x: 1.0, y: 20.0 },
                CurvePoint { x: 2.0, y: 15.0 },
            ]
        );
        assert_eq!(curves.upstroke, None);
        assert_eq!(source.requested(), vec![curve_path("A", Stroke::Down)]);
    }

    #[tokio::test]
    async fn upstroke_fetched_after_downstroke() {
        let source = switch_source();
        let curves = get_curve_data(&source, "A", true).await.unwrap();

        let upstroke = curves.upstroke.expect("upstroke requested");
        assert_eq!(upstroke.len(), 3);
        assert_eq!(upstroke.data[0], CurvePoint { x: 2.0, y: 12.0 });
        assert_eq!(
            source.requested(),
            vec![curve_path("A", Stroke::Down), curve_path("A", Stroke::Up)]
        );
    }

    #[tokio::test]
    async fn missing_downstroke_fails_without_fetching_upstroke() {
        let source = switch_source();
        let err = get_curve_data(&source, "Nope", true).await.unwrap_err();

        assert!(matches!(
            err,
            LoadError::Status { status, .. } if status == StatusCode::NOT_FOUND
        ));
        assert_eq!(source.requested(), vec![curve_path("Nope", Stroke::Down)]);
    }

    #[tokio::test]
    async fn missing_upstroke_is_not_defaulted() {
        let source = MemorySource::default().with(curve_path("B", Stroke::Down), "0,1\n");
        assert!(get_curve_data(&source, "B", true).await.is_err());
        assert!(get_curve_data(&source, "B", false).await.is_ok());
    }

    #[tokio::test]
    async fn malformed_curve_fails_the_load() {
        let source = MemorySource::default().with(curve_path("C", Stroke::Down), "0,1\nx,2\n");
        assert!(matches!(
            get_curve_data(&source, "C", false).await,
            Err(LoadError::InvalidNumber { line: 2, column: 0, .. })
        ));
    }
}
