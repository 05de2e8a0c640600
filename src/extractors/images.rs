// src/extractors/images.rs
use crate::extractors::dom::select_first;
use crate::wiki::models::MoveImages;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

static GALLERY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.attack-gallery").expect("Failed to compile GALLERY_SELECTOR")
});

static PANEL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("article.tabber__panel").expect("Failed to compile PANEL_SELECTOR")
});

static FIGURE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("figure").expect("Failed to compile FIGURE_SELECTOR")
});

static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("img").expect("Failed to compile IMG_SELECTOR")
});

/// Standard and hitbox images of a move, from its gallery tabs or, failing
/// that, from any image in the fragment. Later images of a kind replace earlier ones.
pub fn extract_images(fragment: ElementRef, base_url: &str) -> MoveImages {
    let mut images = MoveImages::default();

    if let Some(gallery) = select_first(fragment, &GALLERY_SELECTOR) {
        for panel in gallery.select(&PANEL_SELECTOR) {
            let is_hitbox_panel = panel.value().attr("id").unwrap_or_default().contains("Hitboxes");

            let img = match select_first(panel, &FIGURE_SELECTOR) {
                Some(figure) => select_first(figure, &IMG_SELECTOR),
                None => select_first(panel, &IMG_SELECTOR),
            };
            if let Some(src) = img.and_then(|img| img.value().attr("src")) {
                assign(&mut images, resolve_image_url(base_url, src), is_hitbox_panel);
            }
        }
    }

    if images.standard.is_none() && images.hitbox.is_none() {
        tracing::debug!("No gallery images, scanning the whole fragment");
        for src in fragment.select(&IMG_SELECTOR).filter_map(|img| img.value().attr("src")) {
            assign(&mut images, resolve_image_url(base_url, src), false);
        }
    }

    images
}

fn assign(images: &mut MoveImages, url: String, is_hitbox_panel: bool) {
    if is_hitbox_panel || url.contains("Hitbox") {
        images.hitbox = Some(url);
    } else {
        images.standard = Some(url);
    }
}

/// Absolute, full-resolution URL for an `<img src>` on the wiki.
pub fn resolve_image_url(base_url: &str, src: &str) -> String {
    let url = format!("{}{}", base_url, src);
    let url = collapse_duplicate_filename(&url);
    thumbnail_to_full_res(&url)
}

/// Drops the last path segment when it repeats the one before it
/// (`.../Foo.png/Foo.png` -> `.../Foo.png`).
///
/// Works around a malformed path the wiki emits for some images; also turns
/// `.../thumb/x/Foo.png/210px-Foo.png` into its `thumb/x/Foo.png` directory.
pub fn collapse_duplicate_filename(url: &str) -> String {
    let mut parts = url.rsplit('/');
    if let (Some(last), Some(second_last)) = (parts.next(), parts.next()) {
        if last.contains(second_last) {
            if let Some((head, _)) = url.rsplit_once('/') {
                return head.to_string();
            }
        }
    }
    url.to_string()
}

/// `<base>/thumb/a/ab/210px-Foo.png` -> `<base>/a/ab/Foo.png`
pub fn thumbnail_to_full_res(url: &str) -> String {
    let parts: Vec<&str> = url.split("/thumb/").collect();
    let [base, path] = parts.as_slice() else {
        return url.to_string();
    };
    let Some(last_slash) = path.rfind('/') else {
        return url.to_string();
    };

    let (dir, filename) = path.split_at(last_slash + 1);
    let filename = match filename.split_once('-') {
        Some((size, rest)) if size.ends_with("px") => rest,
        _ => filename,
    };

    format!("{}/{}{}", base, dir, filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const BASE: &str = "https://www.dustloop.com";

    fn images_of(html: &str) -> MoveImages {
        let document = Html::parse_fragment(html);
        let root = document.select(&Selector::parse("div").unwrap()).next().unwrap();
        extract_images(root, BASE)
    }

    #[test]
    fn test_thumbnail_resolves_to_full_res() {
        assert_eq!(
            resolve_image_url(BASE, "/wiki/images/thumb/a/ab/Foo.png/210px-Foo.png"),
            "https://www.dustloop.com/wiki/images/a/ab/Foo.png"
        );
    }

    #[test]
    fn test_duplicate_filename_collapses() {
        assert_eq!(
            collapse_duplicate_filename("https://www.dustloop.com/wiki/images/a/ab/Foo.png/Foo.png"),
            "https://www.dustloop.com/wiki/images/a/ab/Foo.png"
        );
        assert_eq!(
            collapse_duplicate_filename("https://www.dustloop.com/wiki/images/a/ab/Foo.png"),
            "https://www.dustloop.com/wiki/images/a/ab/Foo.png"
        );
    }

    #[test]
    fn test_thumbnail_without_size_prefix() {
        assert_eq!(
            thumbnail_to_full_res("https://x.org/images/thumb/c/cd/Bar.png"),
            "https://x.org/images/c/cd/Bar.png"
        );
        assert_eq!(thumbnail_to_full_res("https://x.org/images/c/cd/Bar.png"), "https://x.org/images/c/cd/Bar.png");
    }

    #[test]
    fn test_gallery_panels_classified() {
        let html = r#"<div class="attack-container"><div class="attack-gallery">
            <article class="tabber__panel" id="tabber-Images">
              <figure><img src="/wiki/images/thumb/1/12/GBVSR_Vira_5L.png/175px-GBVSR_Vira_5L.png"></figure>
            </article>
            <article class="tabber__panel" id="tabber-Hitboxes">
              <img src="/wiki/images/3/34/GBVSR_Vira_5L_box.png">
            </article>
        </div></div>"#;
        let images = images_of(html);
        assert_eq!(
            images.standard.as_deref(),
            Some("https://www.dustloop.com/wiki/images/1/12/GBVSR_Vira_5L.png")
        );
        assert_eq!(
            images.hitbox.as_deref(),
            Some("https://www.dustloop.com/wiki/images/3/34/GBVSR_Vira_5L_box.png")
        );
    }

    #[test]
    fn test_fallback_scans_all_images() {
        let html = r#"<div><p><img src="/wiki/images/5/56/Vira_2H.png"></p>
            <img src="/wiki/images/7/78/Vira_2H_Hitbox.png"></div>"#;
        let images = images_of(html);
        assert_eq!(images.standard.as_deref(), Some("https://www.dustloop.com/wiki/images/5/56/Vira_2H.png"));
        assert_eq!(
            images.hitbox.as_deref(),
            Some("https://www.dustloop.com/wiki/images/7/78/Vira_2H_Hitbox.png")
        );
    }

    #[test]
    fn test_no_images() {
        assert_eq!(images_of("<div><p>text</p></div>"), MoveImages::default());
    }
}
