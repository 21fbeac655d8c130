//! # pii-core: Mascaramento de Dados Pessoais em Reclamações Bancárias
//!
//! Este crate detecta e substitui dados pessoais (PII) em textos livres de
//! clientes de bancos turcos antes que eles cheguem a qualquer sistema
//! downstream (classificação, busca, LLM). A saída é texto com placeholders
//! tipados como `[MASKED_TCKN]` e uma trilha de auditoria sem nenhum dado
//! original.
//!
//! ## Arquitetura do Sistema
//!
//! O mascaramento é um pipeline de **duas etapas**:
//!
//! 1.  **Entrada**: Texto bruto (UTF-8, qualquer tamanho).
//! 2.  **Etapa 1, contexto** ([`analyzer`]): cada [`recognizer`] do
//!     [`registry`] propõe spans com score base; palavras-chave próximas
//!     ([`tokenizer`]) aumentam o score; sobreposições são resolvidas
//!     ([`span`]) e o limiar global corta o resto.
//! 3.  **Anonimização** ([`anonymizer`]): spans aceitos viram placeholders,
//!     da direita para a esquerda.
//! 4.  **Etapa 2, failsafe** ([`failsafe`]): regex fixas, sem contexto e sem
//!     limiar, varrem o texto já mascarado. Nenhum formato conhecido (IBAN,
//!     TCKN, cartão, telefone, e-mail, conta) sobrevive.
//! 5.  **Saída**: [`MaskedResult`] + [`AuditSummary`] ([`audit`]).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use pii_core::{Masker, MaskingConfig};
//!
//! // 1. Constrói o motor uma vez (compila todas as regex)
//! let masker = Masker::new(MaskingConfig::default()).unwrap();
//!
//! // 2. Mascara uma reclamação
//! let result = masker.mask("CVV kodunuz 123, IBAN: TR33 0006 1005 1978 6457 8413 26");
//!
//! assert_eq!(result.masked_text, "CVV kodunuz [MASKED_CCV], IBAN: [MASKED_IBAN]");
//! for entity in &result.entities {
//!     println!("{} via {}", entity.entity_type, entity.source.as_str());
//! }
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: o [`Masker`], que conecta as duas etapas.
//! - [`builtin`]: os reconhecedores do domínio bancário turco.
//! - [`config`]: configuração em JSON (limiar, janela, reconhecedores extras).
//! - [`validation`]: checksums Luhn, TCKN e IBAN.
//! - [`corpus`]: reclamações sintéticas para demonstração.

pub mod analyzer;
pub mod anonymizer;
pub mod audit;
pub mod builtin;
pub mod config;
pub mod corpus;
pub mod error;
pub mod failsafe;
pub mod normalize;
pub mod pipeline;
pub mod recognizer;
pub mod registry;
pub mod scorer;
pub mod span;
pub mod tokenizer;
pub mod validation;

pub use analyzer::{Analyzer, DEFAULT_SCORE_THRESHOLD};
pub use anonymizer::{Anonymizer, EntitySource, MaskedEntity};
pub use audit::{summarize, AuditSummary};
pub use config::MaskingConfig;
pub use error::{AnalyzeError, ConfigError, ScorerError};
pub use failsafe::FailsafeSweep;
pub use pipeline::{MaskedResult, Masker};
pub use recognizer::{PatternSpec, Recognizer, RecognizerSpec};
pub use registry::{RecognizerRegistry, RegistryBuilder};
pub use scorer::EntityScorer;
pub use span::Match;
pub use tokenizer::ContextConfig;
