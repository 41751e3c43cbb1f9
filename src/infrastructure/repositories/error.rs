use crate::domain::errors::DomainError;

const CNT_CARGO_NOMBRE: &str = "ux_cargos_nombre_vivo";
const CNT_ACTIVE_ASSIGNMENT: &str = "ux_cargo_unidad_activo";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_CARGO_NOMBRE => DomainError::Conflict("cargo name already exists".into()),
                    CNT_ACTIVE_ASSIGNMENT => DomainError::Conflict(
                        "cargo already has an active assignment for this unidad".into(),
                    ),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::InvalidReference(
                            "referenced record not found".into(),
                        );
                    }
                    // lock_timeout and deadlock detection both mean "retry"
                    "55P03" => {
                        return DomainError::Unavailable(
                            "row lock wait timed out, retry the operation".into(),
                        );
                    }
                    "40P01" => {
                        return DomainError::Unavailable(
                            "deadlock detected, retry the operation".into(),
                        );
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
