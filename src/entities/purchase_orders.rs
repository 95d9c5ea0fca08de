//! Purchase orders (`pedidos/compras`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::Entity;
use crate::repository::Identifier;

/// The purchase orders entity.
///
/// # Example
///
/// ```rust,ignore
/// use bling_api::entities::{Entity, PurchaseOrders};
/// use serde_json::json;
///
/// let saved = PurchaseOrders::update(
///     &repository,
///     12_345_678_u64,
///     &json!({"observacoes": "Entregar pela manhã"}),
/// )
/// .await?;
/// for alert in &saved.data.alertas {
///     println!("{alert}");
/// }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PurchaseOrders;

impl Entity for PurchaseOrders {
    type Payload = PurchaseOrder;
    type Response = PurchaseOrder;
    type Filters = PurchaseOrderFilters;
    type Infos = ();

    const NAME: &'static str = "pedidoCompra";
    const ENDPOINT: &'static str = "pedidos/compras";
}

/// A reference to another record by id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: u64,
}

/// Purchase order status codes, sent as numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PurchaseOrderStatus {
    /// Em aberto.
    #[default]
    Open,
    /// Atendido.
    Fulfilled,
    /// Cancelado.
    Cancelled,
    /// Em andamento.
    InProgress,
}

impl From<PurchaseOrderStatus> for u8 {
    fn from(status: PurchaseOrderStatus) -> Self {
        match status {
            PurchaseOrderStatus::Open => 0,
            PurchaseOrderStatus::Fulfilled => 1,
            PurchaseOrderStatus::Cancelled => 2,
            PurchaseOrderStatus::InProgress => 3,
        }
    }
}

impl TryFrom<u8> for PurchaseOrderStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Open),
            1 => Ok(Self::Fulfilled),
            2 => Ok(Self::Cancelled),
            3 => Ok(Self::InProgress),
            other => Err(format!("unknown purchase order status {other}")),
        }
    }
}

/// The `situacao` object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusValue {
    pub valor: PurchaseOrderStatus,
}

/// How a discount value is expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountUnit {
    /// An absolute amount.
    Real,
    /// A percentage of the total.
    Percentual,
}

/// An order-level discount.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderDiscount {
    pub valor: f64,
    pub unidade: DiscountUnit,
}

/// Tax totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Taxes {
    #[serde(rename = "totalICMS", default, skip_serializing_if = "Option::is_none")]
    pub total_icms: Option<f64>,
}

/// Shipping details.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderTransport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frete: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transportador: Option<String>,
    /// Who pays freight: 0 sender, 1 recipient, 2 third party, 9 no freight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frete_por_conta: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peso_bruto: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<u32>,
}

/// One line of a purchase order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderItem {
    #[serde(default)]
    pub descricao: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo_fornecedor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidade: Option<String>,
    #[serde(default)]
    pub valor: f64,
    #[serde(default)]
    pub quantidade: f64,
    #[serde(rename = "aliquotaIPI", default, skip_serializing_if = "Option::is_none")]
    pub aliquota_ipi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao_detalhada: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produto: Option<Reference>,
}

/// One installment of a purchase order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderInstallment {
    #[serde(default)]
    pub valor: f64,
    #[serde(default, with = "crate::entities::bling_date", skip_serializing_if = "Option::is_none")]
    pub data_vencimento: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forma_pagamento: Option<Reference>,
}

/// A purchase order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    /// Set by Bling; never sent on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero: Option<u64>,
    #[serde(default, with = "crate::entities::bling_date", skip_serializing_if = "Option::is_none")]
    pub data: Option<NaiveDate>,
    #[serde(default, with = "crate::entities::bling_date", skip_serializing_if = "Option::is_none")]
    pub data_prevista: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fornecedor: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situacao: Option<StatusValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordem_compra: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes_internas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desconto: Option<PurchaseOrderDiscount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tributacao: Option<Taxes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transporte: Option<PurchaseOrderTransport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub itens: Vec<PurchaseOrderItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parcelas: Vec<PurchaseOrderInstallment>,
}

/// Query parameters for listing purchase orders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagina: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limite: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_fornecedor: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor_situacao: Option<PurchaseOrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_inicial: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_final: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update_request_body() -> serde_json::Value {
        json!({
            "numero": 12,
            "data": "2020-08-24",
            "dataPrevista": "2020-08-30",
            "fornecedor": {"id": 12_345_678},
            "situacao": {"valor": 0},
            "ordemCompra": "351635",
            "observacoes": "Observação sobre o pedido.",
            "observacoesInternas": "Observação interna sobre o pedido.",
            "desconto": {"valor": 15.45, "unidade": "REAL"},
            "categoria": {"id": 12_345_678},
            "tributacao": {"totalICMS": 5.55},
            "transporte": {
                "frete": 15.78,
                "transportador": "Zé Transportes",
                "fretePorConta": 0,
                "pesoBruto": 15.78,
                "volumes": 11
            },
            "itens": [{
                "descricao": "Copo do Bling",
                "codigoFornecedor": "46546546",
                "unidade": "Un",
                "valor": 149.99,
                "quantidade": 12.0,
                "aliquotaIPI": 15.85,
                "descricaoDetalhada": "Descrição do item do pedido.",
                "produto": {"id": 12_345_678}
            }],
            "parcelas": [{
                "valor": 2090.66,
                "dataVencimento": "2020-09-23",
                "observacao": "Observação da parcela.",
                "formaPagamento": {"id": 12_345_678}
            }]
        })
    }

    #[test]
    fn test_purchase_order_reads_full_update_body() {
        let order: PurchaseOrder = serde_json::from_value(update_request_body()).unwrap();

        assert_eq!(order.numero, Some(12));
        assert_eq!(order.data, NaiveDate::from_ymd_opt(2020, 8, 24));
        assert_eq!(order.situacao.unwrap().valor, PurchaseOrderStatus::Open);
        assert_eq!(order.desconto.unwrap().unidade, DiscountUnit::Real);
        assert_eq!(order.tributacao.unwrap().total_icms, Some(5.55));
        assert_eq!(order.itens[0].aliquota_ipi, Some(15.85));
        assert_eq!(order.parcelas[0].forma_pagamento, Some(Reference { id: 12_345_678 }));
    }

    #[test]
    fn test_unset_dates_read_as_none() {
        let order: PurchaseOrder = serde_json::from_value(json!({
            "id": 1,
            "data": "2020-08-24",
            "dataPrevista": "0000-00-00",
            "parcelas": [{"valor": 10.0, "dataVencimento": "0000-00-00"}]
        }))
        .unwrap();

        assert_eq!(order.data, NaiveDate::from_ymd_opt(2020, 8, 24));
        assert_eq!(order.data_prevista, None);
        assert_eq!(order.parcelas[0].data_vencimento, None);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<StatusValue, _> = serde_json::from_value(json!({"valor": 7}));
        assert!(result.is_err());
    }

    #[test]
    fn test_purchase_order_writes_bling_field_names() {
        let order: PurchaseOrder = serde_json::from_value(update_request_body()).unwrap();

        assert_eq!(serde_json::to_value(&order).unwrap(), update_request_body());
    }

    #[test]
    fn test_filters_serialize_status_as_number() {
        let filters = PurchaseOrderFilters {
            valor_situacao: Some(PurchaseOrderStatus::Cancelled),
            id_fornecedor: Some(5),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            json!({"idFornecedor": 5, "valorSituacao": 2})
        );
    }
}
