mod support;

use entrega_core::application::commands::cargos::{CreateCargoCommand, UpdateCargoCommand};
use entrega_core::application::error::ApplicationError;
use entrega_core::domain::errors::DomainError;
use entrega_core::domain::historial::{HistorialRepository, NewAssignment, UnassignTarget};
use support::{admin_actor, cargo_harness, fixed_instant, plain_actor};

#[tokio::test]
async fn create_cargo_persists_and_audits() {
    let harness = cargo_harness();
    let admin = admin_actor(1);

    let cargo = harness
        .service
        .create_cargo(
            &admin,
            CreateCargoCommand {
                nombre: "Director".into(),
                descripcion: Some("desc".into()),
            },
        )
        .await
        .unwrap();

    assert_eq!(cargo.nombre, "Director");
    assert!(cargo.activo);

    let entries = harness.audit.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, "create_cargo");
    assert_eq!(entries[0].actor_id, Some(1));
    assert_eq!(entries[0].metadata.as_ref().unwrap()["nombre"], "Director");
}

#[tokio::test]
async fn duplicate_live_name_conflicts_but_deleted_name_is_reusable() {
    let harness = cargo_harness();
    let admin = admin_actor(1);

    let first = harness
        .service
        .create_cargo(
            &admin,
            CreateCargoCommand {
                nombre: "Director".into(),
                descripcion: None,
            },
        )
        .await
        .unwrap();

    let err = harness
        .service
        .create_cargo(
            &admin,
            CreateCargoCommand {
                nombre: "Director".into(),
                descripcion: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));

    harness.service.delete_cargo(&admin, first.id).await.unwrap();

    let again = harness
        .service
        .create_cargo(
            &admin,
            CreateCargoCommand {
                nombre: "Director".into(),
                descripcion: None,
            },
        )
        .await
        .unwrap();
    assert_ne!(again.id, first.id);
}

#[tokio::test]
async fn update_applies_only_supplied_fields() {
    let harness = cargo_harness();
    let admin = admin_actor(1);
    let cargo = harness.cargos.seed("Director").await;

    let updated = harness
        .service
        .update_cargo(
            &admin,
            UpdateCargoCommand {
                cargo_id: cargo.id,
                nombre: None,
                descripcion: Some("updated".into()),
                activo: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.nombre, "Director");
    assert_eq!(updated.descripcion.as_deref(), Some("updated"));
    assert!(updated.activo);

    let entries = harness.audit.entries();
    assert_eq!(entries.last().unwrap().action, "update_cargo");
    assert_eq!(
        entries.last().unwrap().metadata.as_ref().unwrap()["fields"],
        serde_json::json!(["descripcion"])
    );
}

#[tokio::test]
async fn update_with_no_fields_is_a_validation_error() {
    let harness = cargo_harness();
    let admin = admin_actor(1);
    let cargo = harness.cargos.seed("Director").await;

    let err = harness
        .service
        .update_cargo(
            &admin,
            UpdateCargoCommand {
                cargo_id: cargo.id,
                nombre: None,
                descripcion: None,
                activo: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Validation(_)));
}

#[tokio::test]
async fn delete_is_soft_and_hides_the_cargo() {
    let harness = cargo_harness();
    let admin = admin_actor(1);
    let cargo = harness.cargos.seed("Director").await;

    harness.service.delete_cargo(&admin, cargo.id).await.unwrap();

    use entrega_core::domain::cargo::CargoRepository;
    assert!(harness.cargos.find_by_id(cargo.id).await.unwrap().is_none());

    let err = harness
        .service
        .delete_cargo(&admin, cargo.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn delete_is_refused_while_an_assignment_is_active() {
    let harness = cargo_harness();
    let admin = admin_actor(1);
    let cargo = harness.cargos.seed("Director").await;

    harness
        .historial
        .assign(NewAssignment {
            cargo_id: cargo.id,
            user_id: 7,
            unidad_responsable_id: 3,
            asignado_por_user_id: Some(1),
            motivo: None,
            fecha_inicio: fixed_instant(),
        })
        .await
        .unwrap();

    let err = harness
        .service
        .delete_cargo(&admin, cargo.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Conflict(_))
    ));

    harness
        .historial
        .close(
            UnassignTarget::Pair {
                cargo_id: cargo.id,
                unidad_id: 3,
            },
            fixed_instant(),
        )
        .await
        .unwrap();

    harness.service.delete_cargo(&admin, cargo.id).await.unwrap();
}

/// The guard must hold at flip time, not at some earlier read: an
/// assignment opened after the ledger last looked empty still blocks the
/// delete, because the repository re-checks atomically with the flip.
#[tokio::test]
async fn assignment_opened_after_an_empty_ledger_read_still_blocks_delete() {
    let harness = cargo_harness();
    let admin = admin_actor(1);
    let cargo = harness.cargos.seed("Director").await;

    assert_eq!(harness.historial.active_count(cargo.id, 3), 0);

    harness
        .historial
        .assign(NewAssignment {
            cargo_id: cargo.id,
            user_id: 7,
            unidad_responsable_id: 3,
            asignado_por_user_id: Some(1),
            motivo: None,
            fecha_inicio: fixed_instant(),
        })
        .await
        .unwrap();

    let err = harness
        .service
        .delete_cargo(&admin, cargo.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Conflict(_))
    ));

    use entrega_core::domain::cargo::CargoRepository;
    assert!(harness.cargos.find_by_id(cargo.id).await.unwrap().is_some());
    assert_eq!(harness.historial.active_count(cargo.id, 3), 1);
}

#[tokio::test]
async fn non_admin_cannot_mutate_cargos() {
    let harness = cargo_harness();
    let actor = plain_actor(7);

    let err = harness
        .service
        .create_cargo(
            &actor,
            CreateCargoCommand {
                nombre: "Director".into(),
                descripcion: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn audit_failure_does_not_block_cargo_crud() {
    let harness = cargo_harness();
    let admin = admin_actor(1);

    harness.audit.set_failing(true);

    let cargo = harness
        .service
        .create_cargo(
            &admin,
            CreateCargoCommand {
                nombre: "Director".into(),
                descripcion: None,
            },
        )
        .await
        .unwrap();

    harness.service.delete_cargo(&admin, cargo.id).await.unwrap();
    assert!(harness.audit.entries().is_empty());
}
