//! Embedded device icons.
//!
//! The four SVG assets are compiled into the binary. They back the
//! [`IconLibrary`] port for card rendering and are also served as static
//! files at [`IconKind::path`].

use axum::Router;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;

use zabdash_app::ports::IconLibrary;
use zabdash_domain::icon::IconKind;

const PC: &str = include_str!("../assets/PC.svg");
const SWITCH: &str = include_str!("../assets/Switch.svg");
const SERVER: &str = include_str!("../assets/Server.svg");
const DEFAULT: &str = include_str!("../assets/Default.svg");

/// Icon library backed by the compiled-in assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedIcons;

impl EmbeddedIcons {
    fn asset(kind: IconKind) -> &'static str {
        match kind {
            IconKind::Pc => PC,
            IconKind::Switch => SWITCH,
            IconKind::Server => SERVER,
            IconKind::Default => DEFAULT,
        }
    }
}

impl IconLibrary for EmbeddedIcons {
    fn svg(&self, kind: IconKind) -> Option<&str> {
        Some(Self::asset(kind))
    }
}

/// Routes serving every icon as `image/svg+xml`.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    IconKind::ALL
        .into_iter()
        .fold(Router::new(), |router, kind| {
            router.route(
                kind.path(),
                get(move || async move {
                    (
                        [(header::CONTENT_TYPE, "image/svg+xml")],
                        EmbeddedIcons::asset(kind),
                    )
                        .into_response()
                }),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use zabdash_app::icon_render::colorize;
    use zabdash_domain::severity::FillColor;

    #[test]
    fn should_provide_every_icon_kind() {
        for kind in IconKind::ALL {
            let svg = EmbeddedIcons.svg(kind).unwrap();
            assert!(svg.contains("<svg"), "{kind} is not an svg");
            assert!(svg.contains("class=\"bg"), "{kind} has no background shape");
        }
    }

    #[test]
    fn should_render_every_asset() {
        for kind in IconKind::ALL {
            let svg = colorize(EmbeddedIcons::asset(kind), FillColor::Red).unwrap();
            assert!(svg.contains("fill:#c05046"), "{kind} was not recoloured");
            assert!(svg.contains("width=\"50\""));
        }
    }
}
