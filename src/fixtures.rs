//! Shared HTML samples for unit tests

/// A product tile as copied from the retailer's category page
pub const PRODUCT_TILE: &str = r#"
<html>
<head>
    <script type="application/ld+json">
    {
        "@context": "https://schema.org",
        "@type": "Product",
        "name": "Milk 3% 1L",
        "description": "Fresh pasteurised milk, 3% fat"
    }
    </script>
</head>
<body>
<ul class="tileSection">
    <li class="miglog-prod miglog-sellingmethod-by_unit"
        data-product-code="P_7290004131074"
        data-gtm='{"id":"P_7290004131074","name":"Milk 3% 1L","brand":"Tnuva","category":"Dairy/Milk","price":"6.90"}'>
        <a class="imgContainer" href="/online/he/p/P_7290004131074">
            <img class="pic" src="https://res.cdn.example/products/7290004131074.jpg" alt="Milk 3% 1L">
        </a>
        <div class="text description">
            <strong>Milk 3% 1L</strong>
            <div class="brand-name">Tnuva</div>
        </div>
        <div class="line">
            <span class="price"><span class="number">6.90</span> ₪</span>
        </div>
        <div class="pricePerUnit">6.90 ₪ per 1 liter</div>
        <div class="depositFee">+ deposit 0.30 ₪</div>
    </li>
</ul>
</body>
</html>
"#;
