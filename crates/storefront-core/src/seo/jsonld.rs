//! schema.org JSON-LD documents.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::Site;
use crate::products::Product;

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Contact and address details published in the `Organization` schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    pub description: String,
    pub telephone: String,
    pub email: String,
    pub languages: Vec<String>,
    pub country: String,
    pub locality: String,
    pub same_as: Vec<String>,
}

impl Default for OrganizationProfile {
    fn default() -> Self {
        Self {
            description: "Интернет-магазин качественной одежды в Кыргызстане".to_string(),
            telephone: "+996-555-123-456".to_string(),
            email: "support@unimark.kg".to_string(),
            languages: vec!["Russian".to_string(), "Kyrgyz".to_string()],
            country: "KG".to_string(),
            locality: "Бишкек".to_string(),
            same_as: vec![
                "https://www.facebook.com/unimark".to_string(),
                "https://www.instagram.com/unimark".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub name: String,
    /// Site-relative path.
    pub url: String,
}

impl Breadcrumb {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[must_use]
pub fn organization_schema(site: &Site, profile: &OrganizationProfile) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Organization",
        "name": site.name,
        "description": profile.description,
        "url": site.base_url,
        "logo": site.logo_url(),
        "contactPoint": {
            "@type": "ContactPoint",
            "telephone": profile.telephone,
            "contactType": "customer service",
            "email": profile.email,
            "availableLanguage": profile.languages,
        },
        "address": {
            "@type": "PostalAddress",
            "addressCountry": profile.country,
            "addressLocality": profile.locality,
        },
        "sameAs": profile.same_as,
    })
}

/// `WebSite` schema with a sitelinks search box pointing at `/?search=`.
#[must_use]
pub fn website_schema(site: &Site, description: &str) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "name": site.name,
        "url": site.base_url,
        "description": description,
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("{}/?search={{search_term_string}}", site.base_url),
            },
            "query-input": "required name=search_term_string",
        },
    })
}

/// `BreadcrumbList` with 1-based positions and absolute item URLs.
#[must_use]
pub fn breadcrumb_schema(site: &Site, items: &[Breadcrumb]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": item.name,
                "item": site.absolute(&item.url),
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

/// Home → categories → product category → product.
#[must_use]
pub fn product_breadcrumbs(product: &Product) -> Vec<Breadcrumb> {
    let mut crumbs = vec![
        Breadcrumb::new("Главная", "/"),
        Breadcrumb::new("Категории", "/categories"),
    ];
    if let Some(category_id) = product.category_id() {
        crumbs.push(Breadcrumb::new(
            product.category_name(),
            format!("/category/{category_id}"),
        ));
    }
    crumbs.push(Breadcrumb::new(
        product.name.clone(),
        format!("/product/{}", product.id),
    ));
    crumbs
}

#[must_use]
pub fn product_schema(site: &Site, product: &Product) -> Value {
    let description = product
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "Качественный товар в категории {}",
                product.category_name()
            )
        });
    let image = product
        .primary_image()
        .map_or_else(|| site.logo_url(), |path| site.absolute(path));
    let organization = json!({
        "@type": "Organization",
        "name": site.name,
        "url": site.base_url,
    });

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Product",
        "name": product.name,
        "description": description,
        "image": image,
        "brand": {
            "@type": "Brand",
            "name": site.name,
        },
        "category": product.category_name(),
        "offers": {
            "@type": "Offer",
            "price": product.price.normalize().to_string(),
            "priceCurrency": site.currency_code,
            "availability": "https://schema.org/InStock",
            "url": site.absolute(&format!("/product/{}", product.id)),
            "seller": organization,
        },
        "manufacturer": {
            "@type": "Organization",
            "name": site.name,
        },
    })
}

/// `AggregateRating` for products with real reviews; `None` when the
/// displayed rating is only the no-reviews default.
#[must_use]
pub fn aggregate_rating_schema(product: &Product) -> Option<Value> {
    let value = product.rating().measured()?;
    let count = usize::try_from(product.review_count())
        .unwrap_or(usize::MAX)
        .max(product.reviews.len());

    Some(json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "AggregateRating",
        "ratingValue": value,
        "reviewCount": count,
        "bestRating": 5,
        "worstRating": 1,
    }))
}

#[must_use]
pub fn faq_schema(faqs: &[Faq]) -> Value {
    let entities: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "FAQPage",
        "mainEntity": entities,
    })
}

/// Wraps `value` in a `<script type="application/ld+json">` element.
///
/// `</` is escaped so product text cannot close the script early.
#[must_use]
pub fn script_tag(value: &Value) -> String {
    let body = value.to_string().replace("</", "<\\/");
    format!("<script type=\"application/ld+json\">{body}</script>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::test_site;

    fn sneaker(reviews: serde_json::Value, count: u32) -> Product {
        serde_json::from_value(json!({
            "id": "p1",
            "name": "Sneaker",
            "price": "3200.50",
            "imageUrl": ["/uploads/sneaker.jpg"],
            "category": {"id": "c1", "name": "Shoes"},
            "reviews": reviews,
            "_count": {"reviews": count}
        }))
        .unwrap()
    }

    #[test]
    fn breadcrumb_positions_start_at_one() {
        let site = test_site();
        let schema = breadcrumb_schema(
            &site,
            &[Breadcrumb::new("Главная", "/"), Breadcrumb::new("Shoes", "/category/c1")],
        );
        let items = schema["itemListElement"].as_array().unwrap();
        assert_eq!(items[0]["position"], 1);
        assert_eq!(items[1]["position"], 2);
        assert_eq!(items[1]["item"], "https://unimark.kg/category/c1");
    }

    #[test]
    fn product_breadcrumbs_include_category_and_product() {
        let crumbs = product_breadcrumbs(&sneaker(json!([]), 0));
        let urls: Vec<&str> = crumbs.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["/", "/categories", "/category/c1", "/product/p1"]);
    }

    #[test]
    fn product_schema_uses_absolute_image_and_offer() {
        let schema = product_schema(&test_site(), &sneaker(json!([]), 0));
        assert_eq!(schema["@type"], "Product");
        assert_eq!(schema["image"], "https://unimark.kg/uploads/sneaker.jpg");
        assert_eq!(schema["offers"]["price"], "3200.5");
        assert_eq!(schema["offers"]["priceCurrency"], "KGS");
        assert_eq!(schema["offers"]["url"], "https://unimark.kg/product/p1");
        assert_eq!(schema["description"], "Качественный товар в категории Shoes");
    }

    #[test]
    fn aggregate_rating_only_for_real_reviews() {
        assert!(aggregate_rating_schema(&sneaker(json!([]), 0)).is_none());

        let rated = sneaker(json!([{"rating": 5}, {"rating": 3}, {"rating": 4}]), 3);
        let schema = aggregate_rating_schema(&rated).unwrap();
        assert_eq!(schema["ratingValue"], 4.0);
        assert_eq!(schema["reviewCount"], 3);
    }

    #[test]
    fn website_search_template() {
        let schema = website_schema(&test_site(), "shop");
        assert_eq!(
            schema["potentialAction"]["target"]["urlTemplate"],
            "https://unimark.kg/?search={search_term_string}"
        );
    }

    #[test]
    fn faq_schema_lists_questions() {
        let schema = faq_schema(&[Faq {
            question: "Доставка?".to_string(),
            answer: "По всему Кыргызстану".to_string(),
        }]);
        assert_eq!(schema["mainEntity"][0]["acceptedAnswer"]["text"], "По всему Кыргызстану");
    }

    #[test]
    fn script_tag_escapes_closing_sequences() {
        let tag = script_tag(&json!({"name": "</script><b>"}));
        assert!(tag.starts_with("<script type=\"application/ld+json\">"));
        assert_eq!(tag.matches("</script>").count(), 1);
    }

    #[test]
    fn organization_schema_uses_profile() {
        let schema = organization_schema(&test_site(), &OrganizationProfile::default());
        assert_eq!(schema["logo"], "https://unimark.kg/unimark-logo.svg");
        assert_eq!(schema["address"]["addressCountry"], "KG");
    }
}
