use std::{collections::BTreeSet, sync::Arc};

use condo_service::{Miss, Outcome, PlaceId, Resolution};

use super::{FakePlaces, RecordingDelay, ScriptedPage, hit, names, service, test_config};

#[tokio::test]
async fn portfolio_and_non_keyword_results_are_excluded() {
	let fake = Arc::new(
		FakePlaces::default()
			.with_place("Condo A", "1", -10.9, -37.0)
			.with_place("Condo B", "2", -10.8, -37.1)
			.with_pages(
				"residencial",
				vec![ScriptedPage::Hits(vec![
					hit("1", "Condo A"),
					hit("3", "Residencial X"),
					hit("4", "Padaria Y"),
				])],
			),
	);
	let cfg = test_config(&["residencial"]);
	let radar = service(&cfg, fake.clone(), Arc::new(RecordingDelay::default()));
	let clients = names(&["Condo A", "Condo B"]);
	let portfolio = radar.build_portfolio(&clients).await;

	assert_eq!(portfolio.len(), 2);
	assert!(portfolio.contains(&PlaceId::new("1")));
	assert!(portfolio.contains(&PlaceId::new("2")));

	let report = radar.run_report(&clients, 500, &portfolio).await;

	assert_eq!(report.entries.len(), 2);
	assert_eq!(report.entries[0].client, "Condo A");
	assert_eq!(
		report.entries[0].outcome,
		Outcome::Neighbors(BTreeSet::from(["Residencial X".to_string()]))
	);
}

#[tokio::test]
async fn portfolio_member_never_reported_for_any_client() {
	let fake = Arc::new(
		FakePlaces::default()
			.with_place("Residencial Alfa", "alfa", -10.9, -37.0)
			.with_place("Residencial Beta", "beta", -10.8, -37.1)
			.with_pages(
				"residencial",
				vec![ScriptedPage::Hits(vec![
					hit("alfa", "Residencial Alfa"),
					hit("beta", "Residencial Beta"),
					hit("gama", "Residencial Gama"),
				])],
			),
	);
	let cfg = test_config(&["residencial"]);
	let radar = service(&cfg, fake, Arc::new(RecordingDelay::default()));
	let clients = names(&["Residencial Alfa", "Residencial Beta"]);
	let portfolio = radar.build_portfolio(&clients).await;
	let report = radar.run_report(&clients, 500, &portfolio).await;
	let expected = Outcome::Neighbors(BTreeSet::from(["Residencial Gama".to_string()]));

	assert!(report.entries.iter().all(|entry| entry.outcome == expected));
}

#[tokio::test]
async fn unresolved_client_is_marked_and_never_searched() {
	let fake = Arc::new(
		FakePlaces::default().with_pages(
			"residencial",
			vec![ScriptedPage::Hits(vec![hit("9", "Residencial Fantasma")])],
		),
	);
	let cfg = test_config(&["residencial"]);
	let radar = service(&cfg, fake.clone(), Arc::new(RecordingDelay::default()));
	let clients = names(&["Condo Inexistente"]);
	let portfolio = radar.build_portfolio(&clients).await;

	assert!(portfolio.is_empty());

	let report = radar.run_report(&clients, 500, &portfolio).await;

	assert_eq!(report.entries.len(), 1);
	assert_eq!(report.entries[0].outcome, Outcome::NotFound);
	assert!(fake.requests().is_empty());
	assert!(
		report.render(&cfg.report).starts_with("Cliente: Condo Inexistente | NÃO ENCONTRADO NO MAPS\n")
	);
}

#[tokio::test]
async fn one_entry_per_non_blank_name_in_input_order() {
	let fake = Arc::new(
		FakePlaces::default()
			.with_place("Zeta", "z", 1.0, 1.0)
			.with_place("Alfa", "a", 2.0, 2.0),
	);
	let cfg = test_config(&["residencial"]);
	let radar = service(&cfg, fake.clone(), Arc::new(RecordingDelay::default()));
	let clients = names(&["Zeta", "", "   ", "Perdido", "Alfa"]);
	let portfolio = radar.build_portfolio(&clients).await;
	let report = radar.run_report(&clients, 500, &portfolio).await;
	let order: Vec<&str> = report.entries.iter().map(|entry| entry.client.as_str()).collect();

	assert_eq!(order, vec!["Zeta", "Perdido", "Alfa"]);
	assert_eq!(report.entries[1].outcome, Outcome::NotFound);
	assert_eq!(report.entries[2].outcome, Outcome::Neighbors(BTreeSet::new()));
	// Blank names are never looked up, in either pass.
	assert_eq!(fake.find_count(), 6);

	let stats = report.stats();

	assert_eq!((stats.processed, stats.not_found, stats.with_neighbors), (3, 1, 0));
}

#[tokio::test]
async fn neighbors_are_deduplicated_across_keywords_and_sorted() {
	let fake = Arc::new(
		FakePlaces::default()
			.with_place("Cliente", "c", 0.0, 0.0)
			.with_pages(
				"condomínio",
				vec![ScriptedPage::Hits(vec![
					hit("5", "Residencial Condomínio Sul"),
					hit("6", "Condomínio Aurora"),
				])],
			)
			.with_pages(
				"residencial",
				vec![ScriptedPage::Hits(vec![
					hit("5", "Residencial Condomínio Sul"),
					hit("7", "Edifício Sem Palavra"),
				])],
			),
	);
	let cfg = test_config(&["condomínio", "residencial"]);
	let radar = service(&cfg, fake, Arc::new(RecordingDelay::default()));
	let clients = names(&["Cliente"]);
	let report = radar.run_report(&clients, 500, &Default::default()).await;
	let Outcome::Neighbors(neighbors) = &report.entries[0].outcome else {
		panic!("Client should resolve.");
	};

	assert_eq!(
		neighbors.iter().map(String::as_str).collect::<Vec<_>>(),
		vec!["Condomínio Aurora", "Residencial Condomínio Sul"]
	);
}

#[tokio::test]
async fn upstream_error_on_one_keyword_keeps_other_results() {
	let fake = Arc::new(
		FakePlaces::default()
			.with_place("Cliente", "c", 0.0, 0.0)
			.with_pages(
				"condomínio",
				vec![
					ScriptedPage::Hits(vec![hit("10", "Condomínio Página Um")]),
					ScriptedPage::Http(500),
					ScriptedPage::Hits(vec![hit("11", "Condomínio Nunca Lido")]),
				],
			)
			.with_pages(
				"residencial",
				vec![ScriptedPage::Hits(vec![hit("12", "Residencial Válido")])],
			),
	);
	let cfg = test_config(&["condomínio", "residencial"]);
	let radar = service(&cfg, fake.clone(), Arc::new(RecordingDelay::default()));
	let report = radar.run_report(&names(&["Cliente"]), 500, &Default::default()).await;

	assert_eq!(
		report.entries[0].outcome,
		Outcome::Neighbors(BTreeSet::from([
			"Condomínio Página Um".to_string(),
			"Residencial Válido".to_string(),
		]))
	);
	// Two pages of the failing keyword, one of the other.
	assert_eq!(fake.requests().len(), 3);
}

#[tokio::test]
async fn empty_neighbor_set_renders_none_found() {
	let fake = Arc::new(FakePlaces::default().with_place("Cliente", "c", 0.0, 0.0));
	let cfg = test_config(&["residencial"]);
	let radar = service(&cfg, fake, Arc::new(RecordingDelay::default()));
	let report = radar.run_report(&names(&["Cliente"]), 500, &Default::default()).await;

	assert_eq!(
		report.render(&cfg.report),
		"Cliente: Cliente\nCondomínios próximos:\n - Nenhum encontrado nos critérios.\n---\n"
	);
}

#[tokio::test]
async fn resolver_appends_locality_and_reports_no_match() {
	let fake = Arc::new(FakePlaces::default().with_place("Mar Azul", "m", -10.0, -37.0));
	let cfg = test_config(&["residencial"]);
	let radar = service(&cfg, fake, Arc::new(RecordingDelay::default()));

	assert_eq!(radar.resolver.query_text("  Mar Azul "), "Mar Azul, Aracaju, Sergipe");

	let found = radar.resolver.resolve("Mar Azul").await;

	assert_eq!(found.place().map(|place| place.place_id.as_str()), Some("m"));
	assert_eq!(radar.resolver.resolve("Ninguém").await, Resolution::NotFound(Miss::NoMatch));
}

#[tokio::test]
async fn reused_resolutions_skip_the_second_lookup_but_not_failures() {
	let fake = Arc::new(FakePlaces::default().with_place("Cliente", "c", 0.0, 0.0));
	let mut cfg = test_config(&["residencial"]);

	cfg.search.reuse_resolutions = true;

	let radar = service(&cfg, fake.clone(), Arc::new(RecordingDelay::default()));
	let clients = names(&["Cliente", "Perdido"]);
	let portfolio = radar.build_portfolio(&clients).await;

	assert_eq!(fake.find_count(), 2);

	let report = radar.run_report(&clients, 500, &portfolio).await;

	// Only the failed name is looked up again.
	assert_eq!(fake.find_count(), 3);
	assert_eq!(report.entries[1].outcome, Outcome::NotFound);
}

#[tokio::test]
async fn exhausted_budget_degrades_to_not_found() {
	let fake = Arc::new(
		FakePlaces::default().with_place("Um", "1", 0.0, 0.0).with_place("Dois", "2", 0.0, 0.0),
	);
	let mut cfg = test_config(&["residencial"]);

	cfg.places.max_calls = Some(1);

	let radar = service(&cfg, fake.clone(), Arc::new(RecordingDelay::default()));

	assert!(matches!(radar.resolver.resolve("Um").await, Resolution::Found(_)));
	assert_eq!(
		radar.resolver.resolve("Dois").await,
		Resolution::NotFound(Miss::BudgetExhausted)
	);

	let report = radar.run_report(&names(&["Um", "Dois"]), 500, &Default::default()).await;

	assert!(report.entries.iter().all(|entry| entry.outcome == Outcome::NotFound));
	assert_eq!(fake.find_count(), 1);
	assert_eq!(radar.calls_made(), 4);
}
