use super::*;

fn params_for(template: &Template) -> Params {
    template
        .parameters()
        .iter()
        .map(|name| (name.clone(), format!("<{name}>")))
        .collect()
}

#[test]
fn standard_catalogue_covers_every_category() {
    let catalogue = TemplateCatalogue::standard().unwrap();
    for category in Category::ALL {
        let template = catalogue.get_template(category).unwrap();
        assert_eq!(template.category(), category);
    }
    assert_eq!(catalogue.templates().len(), Category::ALL.len());
}

#[test]
fn instantiate_succeeds_with_exactly_declared_parameters() {
    let catalogue = TemplateCatalogue::standard().unwrap();
    for category in Category::ALL {
        let template = catalogue.get_template(category).unwrap();
        let text = template.instantiate(&params_for(template)).unwrap();
        assert!(!text.contains('{'), "{category} left a placeholder: {text}");
    }
}

#[test]
fn omitting_any_declared_parameter_is_reported() {
    let catalogue = TemplateCatalogue::standard().unwrap();
    for template in catalogue.templates() {
        for omitted in template.parameters() {
            let mut params = params_for(template);
            params.remove(omitted);

            let err = template.instantiate(&params).unwrap_err();
            assert_eq!(
                err,
                PlanError::MissingParameter {
                    category: template.category(),
                    parameter: omitted.clone(),
                }
            );
        }
    }
}

#[test]
fn instantiate_substitutes_values_and_trims() {
    let template = Template::new(
        Category::Itinerary,
        &["destination_city", "travel_days", "interest_type"],
        "\n  Create a {travel_days}-day itinerary for {destination_city} focused on {interest_type}.\n",
    );
    let params = Params::from([
        ("destination_city".to_string(), "Jaipur".to_string()),
        ("travel_days".to_string(), "3".to_string()),
        ("interest_type".to_string(), "Food & Drinks".to_string()),
    ]);

    assert_eq!(
        template.instantiate(&params).unwrap(),
        "Create a 3-day itinerary for Jaipur focused on Food & Drinks."
    );
}

#[test]
fn undeclared_placeholder_fails_catalogue_validation() {
    let template = Template::new(
        Category::Transport,
        &["destination_city"],
        "Transport in {destination_city} during {season}",
    );

    let err = TemplateCatalogue::from_templates(vec![template]).unwrap_err();
    assert_eq!(
        err,
        PlanError::UnboundPlaceholder {
            category: Category::Transport,
            placeholder: "season".to_string(),
        }
    );
}

#[test]
fn instantiate_rechecks_placeholders_at_render_time() {
    let template = Template::new(
        Category::Transport,
        &["destination_city"],
        "Transport in {destination_city} during {season}",
    );
    let params = Params::from([("destination_city".to_string(), "Goa".to_string())]);

    let err = template.instantiate(&params).unwrap_err();
    assert!(matches!(err, PlanError::UnboundPlaceholder { .. }));
}

#[test]
fn unused_declared_parameter_is_accepted() {
    let template = Template::new(
        Category::TravelTips,
        &["destination_city", "budget_amount"],
        "Tips for {destination_city}",
    );
    assert!(template.validate().is_ok());
}

#[test]
fn lookup_by_key_and_unknown_category() {
    let catalogue = TemplateCatalogue::standard().unwrap();
    assert_eq!(
        catalogue.lookup("packing-list").unwrap().category(),
        Category::PackingList
    );
    assert_eq!(
        catalogue.lookup("train-info").unwrap().category(),
        Category::DistanceTrain
    );
    assert_eq!(
        catalogue.lookup("nightlife").unwrap_err(),
        PlanError::UnknownCategory("nightlife".to_string())
    );
}

#[test]
fn partial_catalogue_reports_missing_category() {
    let catalogue = TemplateCatalogue::from_templates(vec![Template::new(
        Category::Transport,
        &["destination_city"],
        "Transport in {destination_city}",
    )])
    .unwrap();

    assert_eq!(
        catalogue.get_template(Category::Weather).unwrap_err(),
        PlanError::UnknownCategory("weather".to_string())
    );
}

#[test]
fn category_keys_round_trip_through_from_str() {
    for category in Category::ALL {
        assert_eq!(category.key().parse::<Category>().unwrap(), category);
        assert_eq!(category.to_string(), category.key());
    }
    assert_eq!(
        "Hotels-Food-Places".parse::<Category>().unwrap(),
        Category::HotelsFoodPlaces
    );
}

#[test]
fn default_plan_excludes_flight_info() {
    assert!(!Category::DEFAULT_PLAN.contains(&Category::FlightInfo));
    assert_eq!(Category::DEFAULT_PLAN.len(), 8);
}
