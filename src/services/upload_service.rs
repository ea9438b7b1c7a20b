// src/services/upload_service.rs
// Guarda no disco os ficheiros recebidos nos formulários. Um upload por
// submissão, nome gerado a partir do timestamp para evitar colisões.
use crate::error::AppResult;
use chrono::Utc;
use std::path::Path;

pub const UPLOADS_DIR: &str = "uploads";
pub const CONTESTANTS_DIR: &str = "uploads/contestants";
pub const LOGO_DIR: &str = "uploads/logo";

// Caminhos fixos usados quando o formulário chega sem ficheiro
pub const DEFAULT_USER_PHOTO: &str = "uploads/pngegg.png";
pub const DEFAULT_PARTY_LOGO: &str = "uploads/logo/old_logo.png";

/// Cria a árvore de diretórios de upload se ainda não existir.
pub fn ensure_upload_dirs() -> std::io::Result<()> {
    for dir in [UPLOADS_DIR, CONTESTANTS_DIR, LOGO_DIR] {
        if !Path::new(dir).exists() {
            std::fs::create_dir_all(dir)?;
            tracing::info!("Diretório de uploads criado: {}", dir);
        }
    }
    Ok(())
}

/// Grava `data` em `dir` com o nome `<timestamp-ms>.<extensão original>`.
/// Devolve o caminho guardado (o mesmo que fica registado na DB).
/// Nenhuma validação de MIME, tamanho ou dimensões é feita.
pub async fn store_upload(dir: &str, original_name: &str, data: &[u8]) -> AppResult<String> {
    let extension = Path::new(original_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let file_name = format!("{}{}", Utc::now().timestamp_millis(), extension);
    let destination = Path::new(dir).join(file_name);

    tokio::fs::write(&destination, data).await?;

    let stored_path = destination.to_string_lossy().into_owned();
    tracing::debug!("Ficheiro gravado em {}", stored_path);
    Ok(stored_path)
}

/// URL pública de um ficheiro guardado, servida sob /uploads.
pub fn public_url(stored_path: &str) -> String {
    let base_name = Path::new(stored_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("/uploads/{}", base_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_preserva_extensao_e_grava_no_destino() {
        let dir = std::env::temp_dir().join("urna_simples_test_uploads");
        std::fs::create_dir_all(&dir).unwrap();
        let dir = dir.to_string_lossy().into_owned();

        let stored = store_upload(&dir, "me.png", b"png-bytes").await.unwrap();
        assert!(stored.ends_with(".png"));
        assert_eq!(std::fs::read(&stored).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn upload_sem_extensao_fica_so_com_o_timestamp() {
        let dir = std::env::temp_dir().join("urna_simples_test_uploads");
        std::fs::create_dir_all(&dir).unwrap();
        let dir = dir.to_string_lossy().into_owned();

        let stored = store_upload(&dir, "semextensao", b"x").await.unwrap();
        let base = Path::new(&stored).file_name().unwrap().to_string_lossy().into_owned();
        assert!(base.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn url_publica_usa_apenas_o_nome_base() {
        assert_eq!(public_url("uploads/pngegg.png"), "/uploads/pngegg.png");
        assert_eq!(public_url("uploads/contestants/123.jpg"), "/uploads/123.jpg");
    }
}
