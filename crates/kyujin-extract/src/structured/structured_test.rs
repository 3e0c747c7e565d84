use super::*;

fn ld(json: &str) -> String {
    format!(r#"<script type="application/ld+json">{json}</script>"#)
}

fn extract(html: &str) -> StructuredData {
    extract_structured(html, &TextNormalizer::default())
}

const FULL_POSTING: &str = r#"{
    "@context": "https://schema.org",
    "@type": "JobPosting",
    "title": "病棟看護師（日勤常勤）",
    "description": "急性期病棟での看護業務<br>夜勤あり<br>診療科目：内科・外科",
    "baseSalary": {"@type": "MonetaryAmount", "currency": "JPY",
        "value": {"@type": "QuantitativeValue", "minValue": "4000000", "maxValue": "5500000", "unitText": "YEAR"}},
    "jobLocation": {"@type": "Place", "address": {"@type": "PostalAddress",
        "addressRegion": "東京都", "addressLocality": "渋谷区", "streetAddress": "神宮前1-1-1"}},
    "hiringOrganization": {"@type": "Organization", "name": "さくら総合病院"},
    "employmentType": "FULL_TIME",
    "occupationalCategory": "看護師",
    "workHours": "8:30〜17:30",
    "qualifications": "正看護師",
    "responsibilities": "<p>病棟での看護業務全般</p>",
    "jobBenefits": "社会保険完備",
    "experienceRequirements": "臨床経験3年以上"
}"#;

#[test]
fn maps_every_recognized_key() {
    let html = format!("<html><head>{}</head><body></body></html>", ld(FULL_POSTING));
    let data = extract(&html);
    let r = &data.record;

    assert_eq!(r.name, "急性期病棟での看護業務");
    assert_eq!(r.price, "年収 4000000〜5500000円");
    assert_eq!(r.prefecture, "東京都");
    assert_eq!(r.city, "渋谷区");
    assert_eq!(r.address, "東京都渋谷区神宮前1-1-1");
    assert_eq!(r.area, "東京都渋谷区");
    assert_eq!(r.facility_name, "さくら総合病院");
    assert_eq!(r.contract, "正社員(常勤)");
    assert_eq!(r.occupation, "看護師");
    assert_eq!(r.working_hours, "8:30〜17:30");
    assert_eq!(r.license, "正看護師");
    assert_eq!(r.detail, "病棟での看護業務全般");
    assert_eq!(r.welfare_program, "社会保険完備");
    assert_eq!(r.required_skill, "臨床経験3年以上");
    // Left for later stages.
    assert_eq!(r.title_original, "");
    assert_eq!(r.position, "");

    assert_eq!(
        data.descriptions,
        vec!["急性期病棟での看護業務\n夜勤あり\n診療科目：内科・外科".to_string()]
    );
    assert_eq!(data.postings.len(), 1);
}

#[test]
fn no_blocks_yields_empty_record() {
    let data = extract("<html><body><h1>求人</h1></body></html>");
    assert!(data.record.is_blank());
    assert!(data.descriptions.is_empty());
    assert!(data.postings.is_empty());
}

#[test]
fn first_block_wins_per_field() {
    let html = format!(
        "{}{}",
        ld(r#"{"@type": "JobPosting", "title": "A", "employmentType": "PART_TIME"}"#),
        ld(r#"{"@type": "JobPosting", "title": "B", "hiringOrganization": "X病院", "employmentType": "FULL_TIME"}"#),
    );
    let data = extract(&html);
    assert_eq!(data.record.name, "A");
    assert_eq!(data.record.contract, "非常勤");
    assert_eq!(data.record.facility_name, "X病院");
    assert_eq!(data.postings.len(), 2);
}

#[test]
fn array_blocks_and_graph_containers() {
    let html = format!(
        "{}{}",
        ld(r#"[{"@type": "BreadcrumbList"}, {"@type": "JobPosting", "title": "配列"}]"#),
        ld(r#"{"@context": "https://schema.org", "@graph": [{"@type": "JobPosting", "hiringOrganization": {"name": "グラフ病院"}}]}"#),
    );
    let data = extract(&html);
    assert_eq!(data.record.name, "配列");
    assert_eq!(data.record.facility_name, "グラフ病院");
}

#[test]
fn malformed_and_foreign_blocks_are_skipped() {
    let html = format!(
        "{}{}{}",
        ld(r#"{"@type": "JobPosting", "title": "#),
        ld(r#"{"@type": "Organization", "name": "Not a job"}"#),
        ld(r#"{"@type": "JobPosting", "employmentType": "CONTRACT"}"#),
    );
    let data = extract(&html);
    assert_eq!(data.record.name, "");
    assert_eq!(data.record.facility_name, "");
    assert_eq!(data.record.contract, "契約社員");
}

#[test]
fn tolerates_single_quotes_and_attribute_order() {
    let html = r#"<script id="ld" type='application/ld+json' data-x="1">
        {"@type": "JobPosting", "title": "属性順"}
    </script>"#;
    assert_eq!(extract(html).record.name, "属性順");
}

#[test]
fn name_falls_back_to_first_description_line() {
    let html = ld(r#"{"@type": "JobPosting", "description": "訪問看護師募集<br />オンコールなし"}"#);
    let data = extract(&html);
    assert_eq!(data.record.name, "訪問看護師募集");
    // Without a title there is nothing to infer the occupation from.
    assert_eq!(data.record.occupation, "");
}

#[test]
fn description_headline_beats_title_for_name() {
    let html = ld(r#"{"@type": "JobPosting", "title": "看護師", "description": "【急募】病棟看護師<br>詳細"}"#);
    let r = extract(&html).record;
    assert_eq!(r.name, "【急募】病棟看護師");
    assert_eq!(r.occupation, "看護師");
}

#[test]
fn title_names_posting_when_description_is_blank() {
    let html = ld(r#"{"@type": "JobPosting", "title": "薬剤師", "description": "<br>調剤業務"}"#);
    assert_eq!(extract(&html).record.name, "薬剤師");
}

#[test]
fn occupation_falls_back_to_title() {
    let html = ld(r#"{"@type": "JobPosting", "title": "薬剤師"}"#);
    assert_eq!(extract(&html).record.occupation, "薬剤師");
}

#[test]
fn employment_type_array_takes_first_recognized() {
    let html = ld(r#"{"@type": "JobPosting", "employmentType": ["OTHER", "PART_TIME", "FULL_TIME"]}"#);
    assert_eq!(extract(&html).record.contract, "非常勤");
}

#[test]
fn text_address_and_location_array() {
    let html = ld(
        r#"{"@type": "JobPosting", "jobLocation": [{"@type": "Place"}, {"address": "大阪府大阪市北区梅田1-1"}]}"#,
    );
    let data = extract(&html);
    assert_eq!(data.record.address, "大阪府大阪市北区梅田1-1");
    assert_eq!(data.record.prefecture, "");
}

#[test]
fn postal_address_without_street_sets_area_only() {
    let html = ld(
        r#"{"@type": "JobPosting", "jobLocation": {"address": {"addressRegion": "神奈川県", "addressLocality": "横浜市"}}}"#,
    );
    let r = extract(&html).record;
    assert_eq!(r.address, "");
    assert_eq!(r.area, "神奈川県横浜市");
}

#[test]
fn numeric_salary_bounds() {
    let html = ld(
        r#"{"@type": "JobPosting", "baseSalary": {"value": {"minValue": 250000, "maxValue": 320000.0, "unitText": "MONTH"}}}"#,
    );
    assert_eq!(extract(&html).record.price, "月給 250000〜320000円");
}
