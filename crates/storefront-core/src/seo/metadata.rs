//! `<head>` metadata for product and static pages.

use std::fmt::Write as _;

use serde::Serialize;

use super::Site;
use crate::listing::format_price;
use crate::products::Product;

/// Characters of the product description quoted in the meta description.
const DESCRIPTION_EXCERPT_CHARS: usize = 120;

/// Open Graph image size advertised for product pages.
const OG_IMAGE_SIZE: u32 = 800;

/// Generic shop terms appended to every product's keywords.
const SHOP_KEYWORDS: [&str; 7] = [
    "купить",
    "цена",
    "доставка",
    "кыргызстан",
    "бишкек",
    "интернет-магазин",
    "одежда",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraphImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub images: Vec<OpenGraphImage>,
    pub site_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub open_graph: Option<OpenGraph>,
    pub twitter: Option<TwitterCard>,
    /// Site-relative canonical path.
    pub canonical: Option<String>,
    pub robots: Option<Robots>,
    /// Extra `<meta property=… content=…>` pairs, in order.
    pub other: Vec<(String, String)>,
}

impl PageMetadata {
    fn basic(title: String, description: String) -> Self {
        Self {
            title,
            description,
            keywords: Vec::new(),
            open_graph: None,
            twitter: None,
            canonical: None,
            robots: None,
            other: Vec::new(),
        }
    }

    /// Renders the metadata as `<head>` tags, one per line.
    #[must_use]
    pub fn to_html(&self, site: &Site) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<title>{}</title>", escape_html(&self.title));
        meta_name(&mut out, "description", &self.description);
        if !self.keywords.is_empty() {
            meta_name(&mut out, "keywords", &self.keywords.join(", "));
        }
        if let Some(robots) = self.robots {
            let index = if robots.index { "index" } else { "noindex" };
            let follow = if robots.follow { "follow" } else { "nofollow" };
            meta_name(&mut out, "robots", &format!("{index}, {follow}"));
        }
        if let Some(canonical) = &self.canonical {
            let _ = writeln!(
                out,
                "<link rel=\"canonical\" href=\"{}\">",
                escape_html(&site.absolute(canonical))
            );
        }
        if let Some(og) = &self.open_graph {
            meta_property(&mut out, "og:title", &og.title);
            meta_property(&mut out, "og:description", &og.description);
            meta_property(&mut out, "og:type", &og.kind);
            meta_property(&mut out, "og:url", &site.absolute(&og.url));
            if let Some(site_name) = &og.site_name {
                meta_property(&mut out, "og:site_name", site_name);
            }
            for image in &og.images {
                meta_property(&mut out, "og:image", &site.absolute(&image.url));
                meta_property(&mut out, "og:image:width", &image.width.to_string());
                meta_property(&mut out, "og:image:height", &image.height.to_string());
                meta_property(&mut out, "og:image:alt", &image.alt);
            }
        }
        if let Some(twitter) = &self.twitter {
            meta_name(&mut out, "twitter:card", &twitter.card);
            meta_name(&mut out, "twitter:title", &twitter.title);
            meta_name(&mut out, "twitter:description", &twitter.description);
            for image in &twitter.images {
                meta_name(&mut out, "twitter:image", &site.absolute(image));
            }
        }
        for (property, content) in &self.other {
            meta_property(&mut out, property, content);
        }
        out
    }
}

fn meta_name(out: &mut String, name: &str, content: &str) {
    let _ = writeln!(
        out,
        "<meta name=\"{}\" content=\"{}\">",
        escape_html(name),
        escape_html(content)
    );
}

fn meta_property(out: &mut String, property: &str, content: &str) {
    let _ = writeln!(
        out,
        "<meta property=\"{}\" content=\"{}\">",
        escape_html(property),
        escape_html(content)
    );
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Metadata for a product detail page.
#[must_use]
pub fn product_metadata(product: &Product, site: &Site) -> PageMetadata {
    let price = format_price(product.price, &site.currency_symbol);
    let category = product.category_name();
    let image = product
        .primary_image()
        .map_or_else(|| site.logo_path.clone(), str::to_string);

    let description = match product.description.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(text) => {
            let excerpt: String = text.chars().take(DESCRIPTION_EXCERPT_CHARS).collect();
            format!(
                "{} - {excerpt}... Цена: {price}. Категория: {category}. Быстрая доставка по Кыргызстану.",
                product.name
            )
        }
        None => format!(
            "{} в категории {category}. Цена: {price}. Качественная одежда с быстрой доставкой по Кыргызстану. Рейтинг: {}/5.",
            product.name,
            product.rating().label()
        ),
    };

    let keywords: Vec<String> = [product.name.as_str(), category]
        .into_iter()
        .chain(SHOP_KEYWORDS)
        .chain([product.seller.fullname.as_str()])
        .chain(product.sizes.iter().map(|s| s.name.as_str()))
        .chain(product.colors.iter().map(|c| c.name.as_str()))
        .map(str::to_lowercase)
        .filter(|k| !k.trim().is_empty())
        .collect();

    let short_title = format!("{} - {price}", product.name);
    let url = format!("/product/{}", product.id);

    PageMetadata {
        title: format!("{short_title} | {category} | {}", site.name),
        description: description.clone(),
        keywords,
        open_graph: Some(OpenGraph {
            title: short_title.clone(),
            description: description.clone(),
            kind: "website".to_string(),
            url: url.clone(),
            images: vec![OpenGraphImage {
                url: image.clone(),
                width: OG_IMAGE_SIZE,
                height: OG_IMAGE_SIZE,
                alt: product.name.clone(),
            }],
            site_name: Some(site.name.clone()),
        }),
        twitter: Some(TwitterCard {
            card: "summary_large_image".to_string(),
            title: short_title,
            description,
            images: vec![image],
        }),
        canonical: Some(url),
        robots: None,
        other: vec![
            (
                "product:price:amount".to_string(),
                product.price.normalize().to_string(),
            ),
            (
                "product:price:currency".to_string(),
                site.currency_code.clone(),
            ),
            ("product:availability".to_string(), "in stock".to_string()),
            ("product:condition".to_string(), "new".to_string()),
            ("product:brand".to_string(), site.name.clone()),
            ("product:category".to_string(), category.to_string()),
        ],
    }
}

/// Metadata for a product id the API does not know.
#[must_use]
pub fn not_found_metadata(site: &Site) -> PageMetadata {
    PageMetadata::basic(
        format!("Товар не найден | {}", site.name),
        format!("Запрашиваемый товар не найден в каталоге {}.", site.name),
    )
}

/// The cart is private to the visitor and must not be indexed.
#[must_use]
pub fn cart_page_metadata(site: &Site) -> PageMetadata {
    let title = format!("Корзина - {}", site.name);
    let short = format!(
        "Корзина покупок {}. Просмотрите выбранные товары, измените количество, оформите заказ.",
        site.name
    );

    let mut meta = PageMetadata::basic(
        title.clone(),
        format!("{short} Быстрое и удобное оформление покупок."),
    );
    meta.keywords = ["корзина", "покупки", "заказ", "оформление заказа", "товары"]
        .map(str::to_string)
        .to_vec();
    meta.open_graph = Some(OpenGraph {
        title,
        description: short,
        kind: "website".to_string(),
        url: "/cart".to_string(),
        images: Vec::new(),
        site_name: None,
    });
    meta.robots = Some(Robots {
        index: false,
        follow: false,
    });
    meta
}

/// Favorites are per visitor, like the cart.
#[must_use]
pub fn favorites_page_metadata(site: &Site) -> PageMetadata {
    let mut meta = PageMetadata::basic(
        format!("Избранное - {}", site.name),
        format!("Ваши избранные товары в {}.", site.name),
    );
    meta.keywords = ["избранное", "список желаний", "товары"]
        .map(str::to_string)
        .to_vec();
    meta.robots = Some(Robots {
        index: false,
        follow: false,
    });
    meta
}

#[must_use]
pub fn about_page_metadata(site: &Site) -> PageMetadata {
    let title = format!("О нас - История и ценности {}", site.name);
    let short = format!(
        "Узнайте больше о {} - интернет-магазине качественной одежды. Наша история, ценности, миссия и достижения.",
        site.name
    );

    let mut meta = PageMetadata::basic(
        title.clone(),
        format!("{short} Более 10 лет опыта в сфере моды."),
    );
    meta.keywords = vec![
        "о нас".to_string(),
        "история компании".to_string(),
        site.name.clone(),
        "интернет-магазин одежды".to_string(),
        "ценности".to_string(),
        "миссия".to_string(),
        "качество".to_string(),
    ];
    meta.open_graph = Some(OpenGraph {
        title: title.clone(),
        description: short.clone(),
        kind: "website".to_string(),
        url: "/about".to_string(),
        images: Vec::new(),
        site_name: None,
    });
    meta.twitter = Some(TwitterCard {
        card: "summary_large_image".to_string(),
        title,
        description: short,
        images: Vec::new(),
    });
    meta.canonical = Some("/about".to_string());
    meta
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::seo::test_site;

    fn jacket(description: Option<&str>) -> Product {
        serde_json::from_value(json!({
            "id": "p9",
            "name": "Denim Jacket",
            "description": description,
            "price": "4590.00",
            "imageUrl": ["/uploads/jacket.jpg"],
            "category": {"id": "c7", "name": "Outerwear"},
            "seller": {"fullname": "Bishkek Denim"},
            "sizes": [{"id": "m", "name": "M"}],
            "colors": [{"id": "b", "name": "Blue"}]
        }))
        .unwrap()
    }

    #[test]
    fn product_title_and_canonical() {
        let meta = product_metadata(&jacket(None), &test_site());
        assert_eq!(
            meta.title,
            "Denim Jacket - 4 590 с. | Outerwear | Unimark"
        );
        assert_eq!(meta.canonical.as_deref(), Some("/product/p9"));
        assert_eq!(meta.open_graph.unwrap().images[0].width, 800);
    }

    #[test]
    fn fallback_description_mentions_default_rating() {
        let meta = product_metadata(&jacket(None), &test_site());
        assert!(meta.description.contains("Рейтинг: 5.0/5."), "{}", meta.description);
        assert!(meta.description.starts_with("Denim Jacket в категории Outerwear"));
    }

    #[test]
    fn description_excerpt_is_limited_to_120_chars() {
        let long = "ж".repeat(300);
        let meta = product_metadata(&jacket(Some(&long)), &test_site());
        let expected = format!("Denim Jacket - {}...", "ж".repeat(120));
        assert!(meta.description.starts_with(&expected));
    }

    #[test]
    fn keywords_are_lowercased_and_include_variants() {
        let meta = product_metadata(&jacket(None), &test_site());
        assert_eq!(meta.keywords[0], "denim jacket");
        assert_eq!(meta.keywords[1], "outerwear");
        assert!(meta.keywords.contains(&"bishkek denim".to_string()));
        assert!(meta.keywords.contains(&"m".to_string()));
        assert!(meta.keywords.contains(&"blue".to_string()));
    }

    #[test]
    fn image_falls_back_to_logo() {
        let mut product = jacket(None);
        product.image_url.clear();
        let meta = product_metadata(&product, &test_site());
        assert_eq!(meta.twitter.unwrap().images, vec!["/unimark-logo.svg"]);
    }

    #[test]
    fn price_tags_use_plain_amount_and_currency() {
        let meta = product_metadata(&jacket(None), &test_site());
        assert!(meta
            .other
            .contains(&("product:price:amount".to_string(), "4590".to_string())));
        assert!(meta
            .other
            .contains(&("product:price:currency".to_string(), "KGS".to_string())));
    }

    #[test]
    fn cart_page_is_not_indexed() {
        let site = test_site();
        let html = cart_page_metadata(&site).to_html(&site);
        assert!(html.contains("<meta name=\"robots\" content=\"noindex, nofollow\">"));
        assert!(html.contains("<title>Корзина - Unimark</title>"));
    }

    #[test]
    fn html_escapes_attribute_values() {
        let site = test_site();
        let mut product = jacket(None);
        product.name = "Tee \"<b>\"".to_string();
        let html = product_metadata(&product, &site).to_html(&site);
        assert!(html.contains("Tee &quot;&lt;b&gt;&quot;"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://unimark.kg/product/p9\">"));
    }

    #[test]
    fn not_found_has_only_title_and_description() {
        let meta = not_found_metadata(&test_site());
        assert_eq!(meta.title, "Товар не найден | Unimark");
        assert!(meta.open_graph.is_none());
        assert!(meta.keywords.is_empty());
    }
}
