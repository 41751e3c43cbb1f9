// tests/support/mocks.rs
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use entrega_core::application::audit::AuditRecorder;
use entrega_core::application::commands::cargos::CargoCommandService;
use entrega_core::application::commands::historial::AssignmentCommandService;
use entrega_core::application::dto::AuthenticatedActor;
use entrega_core::application::ports::time::Clock;
use entrega_core::domain::audit::repository::AuditLogRepository;
use entrega_core::domain::audit::{AuditLog, AuditLogFilter, AuditLogPage, NewAuditLog};
use entrega_core::domain::cargo::{Cargo, CargoNombre, CargoPatch, CargoRepository, NewCargo};
use entrega_core::domain::directory::{UnidadDirectory, UserDirectory};
use entrega_core::domain::errors::{DomainError, DomainResult};
use entrega_core::domain::historial::{
    AssignmentFilter, AssignmentPatch, AssignmentRecord, HistorialRepository, NewAssignment,
    UnassignTarget,
};
use entrega_core::domain::identity::Role;

pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 2, 10, 0, 0).unwrap()
}

pub fn admin_actor(id: i64) -> AuthenticatedActor {
    AuthenticatedActor {
        id,
        username: format!("admin-{id}"),
        role: Role::Admin,
        ip_address: Some("127.0.0.1".into()),
    }
}

pub fn plain_actor(id: i64) -> AuthenticatedActor {
    AuthenticatedActor {
        id,
        username: format!("user-{id}"),
        role: Role::User,
        ip_address: None,
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// --- directories -----------------------------------------------------------

pub struct StubUserDirectory {
    ids: HashSet<i64>,
}

impl StubUserDirectory {
    pub fn with_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

#[async_trait]
impl UserDirectory for StubUserDirectory {
    async fn exists(&self, user_id: i64) -> DomainResult<bool> {
        Ok(self.ids.contains(&user_id))
    }
}

pub struct StubUnidadDirectory {
    ids: HashSet<i64>,
}

impl StubUnidadDirectory {
    pub fn with_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

#[async_trait]
impl UnidadDirectory for StubUnidadDirectory {
    async fn exists(&self, unidad_id: i64) -> DomainResult<bool> {
        Ok(self.ids.contains(&unidad_id))
    }
}

// --- audit -----------------------------------------------------------------

/// Recording audit double. Flip `fail` to make every insert error, which is
/// how the non-blocking audit contract is exercised.
pub struct RecordingAuditRepo {
    state: Mutex<(Vec<AuditLog>, i64)>,
    fail: AtomicBool,
}

impl RecordingAuditRepo {
    pub fn new() -> Self {
        Self {
            state: Mutex::new((Vec::new(), 1)),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn entries(&self) -> Vec<AuditLog> {
        self.state.lock().unwrap().0.clone()
    }
}

impl Default for RecordingAuditRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogRepository for RecordingAuditRepo {
    async fn insert(&self, entry: NewAuditLog) -> DomainResult<AuditLog> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("audit store down".into()));
        }

        let mut state = self.state.lock().unwrap();
        let id = state.1;
        state.1 += 1;
        let log = AuditLog {
            id,
            actor_id: entry.actor_id,
            action: entry.action,
            object_type: entry.object_type,
            object_id: entry.object_id,
            success: entry.success,
            ip_address: entry.ip_address,
            metadata: entry.metadata,
            created_at: fixed_instant(),
        };
        state.0.push(log.clone());
        Ok(log)
    }

    async fn query(
        &self,
        filter: AuditLogFilter,
        skip: i64,
        limit: i64,
    ) -> DomainResult<AuditLogPage> {
        let entries = self.entries();
        let mut matching: Vec<AuditLog> = entries
            .into_iter()
            .filter(|log| {
                filter.actor_id.is_none_or(|id| log.actor_id == Some(id))
                    && filter
                        .object_type
                        .as_deref()
                        .is_none_or(|t| log.object_type.as_deref() == Some(t))
                    && filter.action.as_deref().is_none_or(|a| log.action == a)
                    && filter.start.is_none_or(|s| log.created_at >= s)
                    && filter.end.is_none_or(|e| log.created_at <= e)
            })
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect();

        Ok(AuditLogPage { total, items })
    }
}

// --- cargos ----------------------------------------------------------------

struct StoredCargo {
    cargo: Cargo,
    deleted: bool,
}

pub struct InMemoryCargoRepo {
    state: Mutex<(Vec<StoredCargo>, i64)>,
    ledger: Option<Arc<InMemoryHistorialRepo>>,
}

impl InMemoryCargoRepo {
    pub fn new() -> Self {
        Self {
            state: Mutex::new((Vec::new(), 1)),
            ledger: None,
        }
    }

    /// Couples soft-delete to the assignment ledger, mirroring the Postgres
    /// implementation's in-transaction active check.
    pub fn with_ledger(ledger: Arc<InMemoryHistorialRepo>) -> Self {
        Self {
            state: Mutex::new((Vec::new(), 1)),
            ledger: Some(ledger),
        }
    }

    pub async fn seed(&self, nombre: &str) -> Cargo {
        self.insert(NewCargo {
            nombre: CargoNombre::new(nombre).unwrap(),
            descripcion: None,
            creado_en: fixed_instant(),
        })
        .await
        .unwrap()
    }
}

impl Default for InMemoryCargoRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CargoRepository for InMemoryCargoRepo {
    async fn insert(&self, new_cargo: NewCargo) -> DomainResult<Cargo> {
        let mut state = self.state.lock().unwrap();
        if state
            .0
            .iter()
            .any(|s| !s.deleted && s.cargo.nombre == new_cargo.nombre)
        {
            return Err(DomainError::Conflict("cargo name already exists".into()));
        }

        let id = state.1;
        state.1 += 1;
        let cargo = Cargo {
            id,
            nombre: new_cargo.nombre,
            descripcion: new_cargo.descripcion,
            activo: true,
            creado_en: new_cargo.creado_en,
            actualizado_en: new_cargo.creado_en,
        };
        state.0.push(StoredCargo {
            cargo: cargo.clone(),
            deleted: false,
        });
        Ok(cargo)
    }

    async fn update(&self, patch: CargoPatch) -> DomainResult<Cargo> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .0
            .iter_mut()
            .find(|s| !s.deleted && s.cargo.id == patch.id)
            .ok_or_else(|| DomainError::NotFound("cargo not found".into()))?;

        if let Some(nombre) = patch.nombre {
            stored.cargo.nombre = nombre;
        }
        if let Some(descripcion) = patch.descripcion {
            stored.cargo.descripcion = Some(descripcion);
        }
        if let Some(activo) = patch.activo {
            stored.cargo.activo = activo;
        }
        Ok(stored.cargo.clone())
    }

    // Active check and flip under the same guard, as the Postgres
    // implementation does under the cargo row lock.
    async fn soft_delete(&self, id: i64) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .0
            .iter_mut()
            .find(|s| !s.deleted && s.cargo.id == id)
            .ok_or_else(|| DomainError::NotFound("cargo not found".into()))?;

        if let Some(ledger) = &self.ledger {
            let active = ledger
                .records()
                .iter()
                .any(|r| r.cargo_id == id && r.fecha_fin.is_none());
            if active {
                return Err(DomainError::Conflict(
                    "cargo has active assignments and cannot be deleted".into(),
                ));
            }
        }

        stored.deleted = true;
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Cargo>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .0
            .iter()
            .find(|s| !s.deleted && s.cargo.id == id)
            .map(|s| s.cargo.clone()))
    }

    async fn find_by_nombre(&self, nombre: &CargoNombre) -> DomainResult<Option<Cargo>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .0
            .iter()
            .find(|s| !s.deleted && s.cargo.nombre == *nombre)
            .map(|s| s.cargo.clone()))
    }

    async fn list(&self, skip: i64, limit: i64) -> DomainResult<Vec<Cargo>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .0
            .iter()
            .filter(|s| !s.deleted)
            .skip(skip as usize)
            .take(limit as usize)
            .map(|s| s.cargo.clone())
            .collect())
    }
}

// --- historial -------------------------------------------------------------

/// In-memory ledger. The invariant check and the insert happen under one
/// mutex guard, mirroring what the Postgres implementation gets from its
/// row locks: concurrent assigns for the same pair serialize, and exactly
/// one of them wins.
pub struct InMemoryHistorialRepo {
    state: Mutex<(Vec<AssignmentRecord>, i64)>,
}

impl InMemoryHistorialRepo {
    pub fn new() -> Self {
        Self {
            state: Mutex::new((Vec::new(), 1)),
        }
    }

    pub fn records(&self) -> Vec<AssignmentRecord> {
        self.state.lock().unwrap().0.clone()
    }

    pub fn active_count(&self, cargo_id: i64, unidad_id: i64) -> usize {
        self.records()
            .iter()
            .filter(|r| {
                r.cargo_id == cargo_id
                    && r.unidad_responsable_id == unidad_id
                    && r.fecha_fin.is_none()
            })
            .count()
    }
}

impl Default for InMemoryHistorialRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistorialRepository for InMemoryHistorialRepo {
    async fn assign(&self, new: NewAssignment) -> DomainResult<AssignmentRecord> {
        let mut state = self.state.lock().unwrap();

        let pair_active = state.0.iter().any(|r| {
            r.cargo_id == new.cargo_id
                && r.unidad_responsable_id == new.unidad_responsable_id
                && r.fecha_fin.is_none()
        });
        if pair_active {
            return Err(DomainError::Conflict(
                "cargo already has an active assignment for this unidad".into(),
            ));
        }

        let id = state.1;
        state.1 += 1;
        let record = AssignmentRecord {
            id,
            cargo_id: new.cargo_id,
            user_id: new.user_id,
            unidad_responsable_id: new.unidad_responsable_id,
            fecha_inicio: new.fecha_inicio,
            fecha_fin: None,
            asignado_por_user_id: new.asignado_por_user_id,
            motivo: new.motivo,
            creado_en: new.fecha_inicio,
            actualizado_en: new.fecha_inicio,
        };
        state.0.push(record.clone());
        Ok(record)
    }

    async fn close(
        &self,
        target: UnassignTarget,
        ended_at: DateTime<Utc>,
    ) -> DomainResult<AssignmentRecord> {
        let mut state = self.state.lock().unwrap();
        let record = state
            .0
            .iter_mut()
            .find(|r| {
                r.fecha_fin.is_none()
                    && match target {
                        UnassignTarget::Record { hist_id } => r.id == hist_id,
                        UnassignTarget::Pair { cargo_id, unidad_id } => {
                            r.cargo_id == cargo_id && r.unidad_responsable_id == unidad_id
                        }
                    }
            })
            .ok_or_else(|| DomainError::NotFound("no active assignment to close".into()))?;

        record.fecha_fin = Some(ended_at);
        record.actualizado_en = ended_at;
        Ok(record.clone())
    }

    async fn update(&self, patch: AssignmentPatch) -> DomainResult<AssignmentRecord> {
        let mut state = self.state.lock().unwrap();
        let record = state
            .0
            .iter_mut()
            .find(|r| r.id == patch.id)
            .ok_or_else(|| DomainError::NotFound("historial record not found".into()))?;

        if let Some(motivo) = patch.motivo {
            record.motivo = Some(motivo);
        }
        if let Some(fecha_fin) = patch.fecha_fin {
            record.fecha_fin = Some(fecha_fin);
        }
        Ok(record.clone())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<AssignmentRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state.0.iter().find(|r| r.id == id).cloned())
    }

    async fn list(
        &self,
        filter: AssignmentFilter,
        skip: i64,
        limit: i64,
    ) -> DomainResult<Vec<AssignmentRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .0
            .iter()
            .filter(|r| {
                filter.user_id.is_none_or(|id| r.user_id == id)
                    && filter.cargo_id.is_none_or(|id| r.cargo_id == id)
                    && filter.unidad_id.is_none_or(|id| r.unidad_responsable_id == id)
            })
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

// --- wiring ----------------------------------------------------------------

pub struct AssignmentHarness {
    pub service: Arc<AssignmentCommandService>,
    pub historial: Arc<InMemoryHistorialRepo>,
    pub cargos: Arc<InMemoryCargoRepo>,
    pub audit: Arc<RecordingAuditRepo>,
}

pub fn assignment_harness(
    user_ids: impl IntoIterator<Item = i64>,
    unidad_ids: impl IntoIterator<Item = i64>,
) -> AssignmentHarness {
    let historial = Arc::new(InMemoryHistorialRepo::new());
    let cargos = Arc::new(InMemoryCargoRepo::new());
    let audit = Arc::new(RecordingAuditRepo::new());

    let service = Arc::new(AssignmentCommandService::new(
        Arc::clone(&historial) as Arc<dyn HistorialRepository>,
        Arc::clone(&cargos) as Arc<dyn CargoRepository>,
        Arc::new(StubUserDirectory::with_ids(user_ids)),
        Arc::new(StubUnidadDirectory::with_ids(unidad_ids)),
        AuditRecorder::new(Arc::clone(&audit) as Arc<dyn AuditLogRepository>),
        Arc::new(FixedClock(fixed_instant())),
    ));

    AssignmentHarness {
        service,
        historial,
        cargos,
        audit,
    }
}

pub struct CargoHarness {
    pub service: CargoCommandService,
    pub cargos: Arc<InMemoryCargoRepo>,
    pub historial: Arc<InMemoryHistorialRepo>,
    pub audit: Arc<RecordingAuditRepo>,
}

pub fn cargo_harness() -> CargoHarness {
    let historial = Arc::new(InMemoryHistorialRepo::new());
    let cargos = Arc::new(InMemoryCargoRepo::with_ledger(Arc::clone(&historial)));
    let audit = Arc::new(RecordingAuditRepo::new());

    let service = CargoCommandService::new(
        Arc::clone(&cargos) as Arc<dyn CargoRepository>,
        AuditRecorder::new(Arc::clone(&audit) as Arc<dyn AuditLogRepository>),
        Arc::new(FixedClock(fixed_instant())),
    );

    CargoHarness {
        service,
        cargos,
        historial,
        audit,
    }
}
